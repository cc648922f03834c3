/// A local authority as published by the rating authority. Identity is `local_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    name: String,
    local_id: i64,
    establishment_count: i64,
}

impl Authority {
    pub fn new(name: String, local_id: i64, establishment_count: i64) -> Self {
        Self {
            name,
            local_id,
            establishment_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_id(&self) -> i64 {
        self.local_id
    }

    pub fn establishment_count(&self) -> i64 {
        self.establishment_count
    }
}
