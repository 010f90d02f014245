use crate::cluster::structs::beacon::Beacon;

impl Beacon {
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Beacon, serde_json::Error> {
        serde_json::from_slice(data)
    }
}
