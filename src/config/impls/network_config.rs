use std::time::Duration;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::network_config::NetworkConfig;

impl NetworkConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout)
    }

    pub fn head_mark_bytes(&self) -> Result<Option<Vec<u8>>, CustomError> {
        Self::mark_bytes(self.head_mark.as_deref(), "head_mark")
    }

    pub fn tail_mark_bytes(&self) -> Result<Option<Vec<u8>>, CustomError> {
        Self::mark_bytes(self.tail_mark.as_deref(), "tail_mark")
    }

    fn mark_bytes(mark: Option<&str>, name: &str) -> Result<Option<Vec<u8>>, CustomError> {
        match mark {
            None => Ok(None),
            Some("") => Ok(None),
            Some(data) => {
                match hex::decode(data) {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(_) => Err(CustomError::new(&format!("{} is not a valid hex string: '{}'", name, data)))
                }
            }
        }
    }
}
