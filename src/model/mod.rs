use std::fmt;

/// Free-text search query made of a track's title and its first artist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackDescriptor(String);

impl TrackDescriptor {
    pub fn new(title: &str, artist_name: Option<&str>) -> Self {
        Self(match artist_name {
            Some(artist_name) => format!("{} {}", title, artist_name),
            None => title.to_owned(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaLocator(String);

impl MediaLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_puts_the_title_before_the_artist() {
        let descriptor = TrackDescriptor::new("Windowlicker", Some("Aphex Twin"));
        assert_eq!(descriptor.as_str(), "Windowlicker Aphex Twin");
    }

    #[test]
    fn descriptor_without_an_artist_is_the_title() {
        assert_eq!(TrackDescriptor::new("Untitled", None).as_str(), "Untitled");
    }
}
