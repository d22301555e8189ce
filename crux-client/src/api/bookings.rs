use serde::Serialize;
use shared::booking::{BookingCommand, is_allowed};
use shared::error::{AppError, ErrorCode};
use shared::models::{AvailabilityQuery, AvailabilitySlot, Booking, SessionContext};
use shared::response::{ApiResponse, MaybeEnveloped, SlotsPayload};

use super::{CruxApi, Echo, echoed};
use crate::ClientResult;
use crate::http::HttpClient;

/// Body of the seat / complete / cancel endpoints
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingActionBody<'a> {
    org_name: &'a str,
    store_name: &'a str,
    updated_by: &'a str,
}

impl<C: HttpClient> CruxApi<C> {
    /// Bookings of the current store
    pub async fn list_bookings(&self, ctx: &SessionContext) -> ClientResult<Vec<Booking>> {
        let resp: MaybeEnveloped<Vec<Booking>> = self
            .client
            .get(
                "api/booking",
                &[
                    ("orgName", ctx.org_name.as_str()),
                    ("storeName", ctx.current_store.as_str()),
                ],
            )
            .await?;
        Ok(resp.into_inner())
    }

    pub async fn create_booking(&self, ctx: &SessionContext, booking: Booking) -> ClientResult<Option<Booking>> {
        let store = ctx.require_store()?;
        let booking = Booking {
            org_name: ctx.org_name.clone(),
            store_name: store.to_string(),
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            ..booking
        };
        tracing::info!(
            customer = %booking.customer_name,
            start = %booking.start_time,
            guests = booking.guests_count,
            "Creating booking"
        );
        let echo: Echo<Booking> = self.client.post("api/booking/create", &[], &booking).await?;
        Ok(echoed(echo))
    }

    /// Save an edited booking; completed and cancelled bookings are final
    pub async fn update_booking(&self, ctx: &SessionContext, booking: Booking) -> ClientResult<Option<Booking>> {
        if booking.status.is_terminal() {
            return Err(AppError::with_message(
                ErrorCode::InvalidBookingTransition,
                format!("Cannot edit a {} booking", booking.status),
            )
            .into());
        }
        let booking = Booking {
            org_name: ctx.org_name.clone(),
            store_name: ctx.current_store.clone(),
            updated_by: ctx.user_id.clone(),
            ..booking
        };
        tracing::info!(booking_id = ?booking.id, "Updating booking");
        let echo: Echo<Booking> = self.client.post("api/booking/update", &[], &booking).await?;
        Ok(echoed(echo))
    }

    /// Seat, complete or cancel a booking
    pub async fn booking_action(
        &self,
        ctx: &SessionContext,
        booking: &Booking,
        command: BookingCommand,
    ) -> ClientResult<Option<Booking>> {
        let id = booking
            .id
            .as_deref()
            .ok_or_else(|| AppError::with_message(ErrorCode::BookingNotFound, "Booking has no id"))?;
        if !is_allowed(booking, command) {
            return Err(AppError::with_message(
                ErrorCode::InvalidBookingTransition,
                format!("Cannot {} a {} booking", command.path_segment(), booking.status),
            )
            .into());
        }
        let body = BookingActionBody {
            org_name: &ctx.org_name,
            store_name: &ctx.current_store,
            updated_by: &ctx.user_id,
        };
        tracing::info!(booking_id = id, to = %command.target(), "Booking action");
        let path = format!("api/booking/{id}/{}", command.path_segment());
        let echo: Echo<Booking> = self.client.post(&path, &[], &body).await?;
        Ok(echoed(echo))
    }

    /// Raw slots for a date and party size; validate the query first
    pub async fn check_availability(
        &self,
        ctx: &SessionContext,
        query: &AvailabilityQuery,
    ) -> ClientResult<Vec<AvailabilitySlot>> {
        query.validate()?;
        let party_size = query.party_size.to_string();
        let resp: ApiResponse<SlotsPayload> = self
            .client
            .get(
                "api/booking/availability",
                &[
                    ("orgName", ctx.org_name.as_str()),
                    ("storeName", ctx.current_store.as_str()),
                    ("date", query.date.trim()),
                    ("partySize", party_size.as_str()),
                ],
            )
            .await?;
        tracing::debug!(date = %query.date, slots = resp.data.slots.len(), "Availability received");
        Ok(resp.data.slots)
    }
}
