use http::HeaderMap;

pub trait HeaderExtractor {
    type Error;

    /// Returns the header value, or an empty string if the header is absent.
    fn extract_header<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, Self::Error>;

    fn header_name(&self) -> &str;
}
