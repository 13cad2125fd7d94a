/// Status line and headers of a response, captured once the head has arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// The HTTP status code.
    pub status: u16,
    /// The announced body length, if known.
    pub content_length: Option<u64>,
    /// Every header in the order received. Header names are lowercase.
    pub headers: Vec<(String, String)>,
}
