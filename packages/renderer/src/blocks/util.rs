//! Small helpers shared by block renderers.

/// Turn user-entered links into absolute URLs. Empty input becomes `#`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return "#".to_string();
    }
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
    {
        return url.to_string();
    }
    if let Some(rest) = url.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if url.starts_with('#') || url.starts_with('/') {
        return url.to_string();
    }
    format!("https://{}", url)
}

/// Extract the 11-character video id from the common YouTube URL shapes.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    const MARKERS: [&str; 4] = [
        "youtube.com/watch?v=",
        "youtu.be/",
        "youtube.com/embed/",
        "youtube.com/shorts/",
    ];

    MARKERS.iter().find_map(|marker| {
        let start = url.find(marker)? + marker.len();
        let id: String = url[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .take(11)
            .collect();
        (id.len() == 11).then_some(id)
    })
}

/// Percent-encode like `encodeURIComponent`.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Spotify share link or URI to its embed URL.
pub fn spotify_embed_url(url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("spotify:") {
        let mut parts = rest.split(':');
        let (kind, id) = (parts.next()?, parts.next()?);
        return Some(format!("https://open.spotify.com/embed/{}/{}", kind, id));
    }

    let path = url.split("://").nth(1)?.split_once('/')?.1;
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., kind, id] => Some(format!("https://open.spotify.com/embed/{}/{}", kind, id)),
        _ => None,
    }
}
