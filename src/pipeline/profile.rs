use std::sync::Arc;

use tracing::debug;

use crate::api::opendota::{OpenDotaClient, PlayerResponse};
use crate::error::FetchError;
use crate::models::AccountId;

/// Outcome of a profile lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found {
        name: String,
        avatar: Option<String>,
    },
    /// No populated profile section in the response
    Private,
    /// The request itself failed
    Unavailable(FetchError),
}

/// Reads a player's public profile
pub struct ProfileResolver {
    client: Arc<OpenDotaClient>,
}

impl ProfileResolver {
    pub fn new(client: Arc<OpenDotaClient>) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, account_id: AccountId) -> ProfileLookup {
        match self.client.get_player(account_id).await {
            Ok(response) => {
                let lookup = Self::from_response(response);
                debug!("Profile {}: {:?}", account_id, lookup);
                lookup
            }
            Err(e) => ProfileLookup::Unavailable(e),
        }
    }

    /// A profile counts as public only when it carries a non-empty persona name
    pub fn from_response(response: PlayerResponse) -> ProfileLookup {
        let Some(profile) = response.profile else {
            return ProfileLookup::Private;
        };

        match profile.personaname.filter(|name| !name.is_empty()) {
            Some(name) => ProfileLookup::Found {
                name,
                avatar: profile.avatarfull,
            },
            None => ProfileLookup::Private,
        }
    }
}
