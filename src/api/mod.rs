pub mod opendota;

pub use opendota::{ClientSettings, OpenDotaClient, OPENDOTA_BASE_URL};
