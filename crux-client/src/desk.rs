//! Booking desk view model
//!
//! Bookings of the current store, the availability dialog and the
//! calendar. All wall-clock values are in the store's timezone; bookings
//! are sent and received as UTC.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use shared::booking::{
    BookingCommand, BookingForm, DEFAULT_MAX_SLOTS, SlotContact, calendar_selection_draft,
    filter_available_slots, is_selectable_future, resolve_zone, slot_booking_draft, slot_window,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{AvailabilityQuery, AvailabilitySlot, Booking, SessionContext};

use crate::api::CruxApi;
use crate::guard::InFlight;
use crate::http::HttpClient;
use crate::liveness::Liveness;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
struct DeskState {
    bookings: Vec<Booking>,
    slots: Vec<AvailabilitySlot>,
    notice: Option<String>,
}

pub struct BookingDesk<C> {
    api: Arc<CruxApi<C>>,
    ctx: SessionContext,
    tz: Tz,
    state: Arc<Mutex<DeskState>>,
    in_flight: InFlight,
    liveness: Liveness,
}

impl<C: HttpClient> BookingDesk<C> {
    /// Fails when the store timezone is not recognized
    pub fn new(api: Arc<CruxApi<C>>, ctx: SessionContext) -> ClientResult<Self> {
        let tz = resolve_zone(ctx.store_timezone()).map_err(AppError::from)?;
        Ok(Self {
            api,
            ctx,
            tz,
            state: Arc::new(Mutex::new(DeskState::default())),
            in_flight: InFlight::new(),
            liveness: Liveness::new(),
        })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().bookings.clone()
    }

    /// Slots from the last availability check
    pub fn slots(&self) -> Vec<AvailabilitySlot> {
        self.state.lock().slots.clone()
    }

    pub fn take_notice(&self) -> Option<String> {
        self.state.lock().notice.take()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_in_flight()
    }

    pub async fn refresh(&self) -> ClientResult<()> {
        match self.api.list_bookings(&self.ctx).await {
            Ok(bookings) => self
                .liveness
                .apply(|| {
                    tracing::debug!(bookings = bookings.len(), "Bookings replaced");
                    self.state.lock().bookings = bookings;
                })
                .ok_or(ClientError::Closed),
            Err(e) => {
                self.report("refresh", &e);
                Err(e)
            }
        }
    }

    /// Query availability; keeps the first available slots only
    pub async fn check_availability(&self, query: &AvailabilityQuery) -> ClientResult<Vec<AvailabilitySlot>> {
        if !self.liveness.is_alive() {
            return Err(ClientError::Closed);
        }
        let slots = match self
            .in_flight
            .run(self.api.check_availability(&self.ctx, query))
            .await
        {
            Ok(slots) => filter_available_slots(&slots, DEFAULT_MAX_SLOTS),
            Err(e) => {
                self.report("check availability", &e);
                return Err(e);
            }
        };
        self.liveness
            .apply(|| self.state.lock().slots = slots.clone())
            .ok_or(ClientError::Closed)?;
        Ok(slots)
    }

    /// Booking form prefilled from a picked slot; nothing is sent
    pub fn pick_slot(
        &self,
        slot: &AvailabilitySlot,
        contact: &SlotContact,
        now: DateTime<Utc>,
    ) -> ClientResult<BookingForm> {
        if !slot.is_available {
            return Err(AppError::with_message(ErrorCode::SlotUnavailable, "Slot is no longer available").into());
        }
        let window = slot_window(slot, self.tz).map_err(AppError::from)?;
        if !is_selectable_future(window.start, now) {
            return Err(AppError::new(ErrorCode::BookingInPast).into());
        }
        Ok(slot_booking_draft(slot, contact, self.tz).map_err(AppError::from)?)
    }

    /// Booking form for a calendar range; `None` for a range in the past
    pub fn select_range(&self, start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Option<BookingForm> {
        calendar_selection_draft(start, end, now, self.tz)
    }

    /// Create a booking from the form
    pub async fn submit(&self, form: BookingForm, now: DateTime<Utc>) -> ClientResult<()> {
        let booking = form.into_new_booking(&self.ctx, self.tz, now)?;
        self.mutate("create booking", async {
            self.api.create_booking(&self.ctx, booking).await.map(drop)
        })
        .await
    }

    pub async fn edit(&self, booking_id: &str, form: BookingForm) -> ClientResult<()> {
        let existing = self.find(booking_id)?;
        let booking = form.apply_to(&existing, &self.ctx, self.tz)?;
        self.mutate("update booking", async {
            self.api.update_booking(&self.ctx, booking).await.map(drop)
        })
        .await
    }

    /// Seat, complete or cancel
    pub async fn act(&self, booking_id: &str, command: BookingCommand) -> ClientResult<()> {
        let booking = self.find(booking_id)?;
        self.mutate("booking action", async {
            self.api.booking_action(&self.ctx, &booking, command).await.map(drop)
        })
        .await
    }

    pub fn close(&self) {
        tracing::debug!("Booking desk closed");
        self.liveness.close();
    }

    fn find(&self, booking_id: &str) -> ClientResult<Booking> {
        self.state
            .lock()
            .bookings
            .iter()
            .find(|b| b.id.as_deref() == Some(booking_id))
            .cloned()
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {booking_id} not found")).into()
            })
    }

    async fn mutate(&self, action: &str, fut: impl Future<Output = ClientResult<()>>) -> ClientResult<()> {
        if !self.liveness.is_alive() {
            return Err(ClientError::Closed);
        }
        if let Err(e) = self.in_flight.run(fut).await {
            self.report(action, &e);
            return Err(e);
        }
        if self.liveness.is_alive() {
            let _ = self.refresh().await;
        }
        Ok(())
    }

    fn report(&self, action: &str, err: &ClientError) {
        match err {
            ClientError::Busy | ClientError::Closed => return,
            e if e.is_remote_failure() => {
                let category = e.code().category().name();
                tracing::error!(action, category, error = %e, "Booking action failed")
            }
            e => tracing::warn!(action, code = %e.code(), error = %e, "Booking action rejected"),
        }
        let message = err.user_message();
        self.liveness.apply(|| self.state.lock().notice = Some(message));
    }
}
