//! Mail participant as exposed through the API.

use serde::{Deserialize, Serialize};

/// Named address on either side of an email.
///
/// Only the configured sender identity carries an avatar; recipients
/// always serialize with `avatar: null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub avatar: Option<String>,
}
