#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Establishment {
    name: String,
    /// Raw rating value. `"1"`..`"5"` are star ratings, anything else is a
    /// categorical outcome such as `"Exempt"` or `"AwaitingInspection"`.
    rating: String,
}

impl Establishment {
    pub fn new(name: String, rating: String) -> Self {
        Self { name, rating }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }
}
