use shared::models::Role;
use shared::response::MaybeEnveloped;

use super::CruxApi;
use crate::ClientResult;
use crate::http::HttpClient;

impl<C: HttpClient> CruxApi<C> {
    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        let resp: MaybeEnveloped<Vec<Role>> = self.client.get("api/role", &[]).await?;
        Ok(resp.into_inner())
    }
}
