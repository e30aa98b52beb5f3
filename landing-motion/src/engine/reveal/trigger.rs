use bevy::prelude::*;

/// Vertical extent of a mounted section in page coordinates.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionBounds {
    pub top: f32,
    pub height: f32,
}

/// Current scroll offset and viewport height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollViewport {
    pub scroll: f32,
    pub height: f32,
}

/// A point where an element edge meets a viewport edge.
///
/// Anchors are fractions of the element (or viewport) height; offsets are
/// pixels added to each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPoint {
    pub element_anchor: f32,
    pub element_offset: f32,
    pub viewport_anchor: f32,
    pub viewport_offset: f32,
}

impl TriggerPoint {
    /// Parse `"<element> <viewport>"`, e.g. `"top center+=100"` or `"top 80%"`.
    ///
    /// Edges are `top`, `center`, `bottom`, a percentage, or a pixel value,
    /// each optionally followed by `+=N` or `-=N`. The viewport edge defaults
    /// to `bottom` when omitted.
    pub fn parse(notation: &str) -> Option<Self> {
        let mut tokens = notation.split_whitespace();
        let (element_anchor, element_offset) = parse_edge(tokens.next()?)?;
        let (viewport_anchor, viewport_offset) = match tokens.next() {
            Some(token) => parse_edge(token)?,
            None => (1.0, 0.0),
        };
        if tokens.next().is_some() {
            return None;
        }
        Some(Self {
            element_anchor,
            element_offset,
            viewport_anchor,
            viewport_offset,
        })
    }

    /// Scroll offset at which this point is reached.
    pub fn scroll_position(&self, section: SectionBounds, viewport_height: f32) -> f32 {
        let element = section.top + self.element_anchor * section.height + self.element_offset;
        let viewport = self.viewport_anchor * viewport_height + self.viewport_offset;
        element - viewport
    }
}

fn parse_edge(token: &str) -> Option<(f32, f32)> {
    let (edge, offset) = match token.find("+=").or_else(|| token.find("-=")) {
        Some(at) => {
            let magnitude: f32 = token[at + 2..].trim_end_matches("px").parse().ok()?;
            let sign = if token[at..].starts_with('-') { -1.0 } else { 1.0 };
            (&token[..at], sign * magnitude)
        }
        None => (token, 0.0),
    };

    let (anchor, pixels) = match edge {
        "top" => (0.0, 0.0),
        "center" => (0.5, 0.0),
        "bottom" => (1.0, 0.0),
        percent if percent.ends_with('%') => {
            let value: f32 = percent.trim_end_matches('%').parse().ok()?;
            (value / 100.0, 0.0)
        }
        pixels => (0.0, pixels.trim_end_matches("px").parse().ok()?),
    };
    Some((anchor, pixels + offset))
}

/// Progress from `start` to `end`, clamped to `[0, 1]`.
pub fn scrub_progress(start: f32, end: f32, scroll: f32) -> f32 {
    if end <= start {
        return if scroll >= start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / (end - start)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keyword_edges() {
        let point = TriggerPoint::parse("top center").unwrap();
        assert_eq!(point.element_anchor, 0.0);
        assert_eq!(point.viewport_anchor, 0.5);
        assert_eq!(point.viewport_offset, 0.0);
    }

    #[test]
    fn parses_relative_offsets() {
        let point = TriggerPoint::parse("top center+=100").unwrap();
        assert_eq!(point.viewport_offset, 100.0);

        let point = TriggerPoint::parse("top-=100").unwrap();
        assert_eq!(point.element_anchor, 0.0);
        assert_eq!(point.element_offset, -100.0);
        assert_eq!(point.viewport_anchor, 1.0);
    }

    #[test]
    fn parses_percentages_and_pixels() {
        let point = TriggerPoint::parse("top 80%").unwrap();
        assert!((point.viewport_anchor - 0.8).abs() < 1e-6);

        let point = TriggerPoint::parse("120px top").unwrap();
        assert_eq!(point.element_offset, 120.0);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(TriggerPoint::parse(""), None);
        assert_eq!(TriggerPoint::parse("middle top"), None);
        assert_eq!(TriggerPoint::parse("top top extra"), None);
        assert_eq!(TriggerPoint::parse("top+=abc"), None);
    }

    #[test]
    fn scroll_position_matches_edges() {
        let section = SectionBounds {
            top: 1000.0,
            height: 600.0,
        };
        let start = TriggerPoint::parse("top center").unwrap();
        assert_eq!(start.scroll_position(section, 800.0), 600.0);

        let later = TriggerPoint::parse("top center+=100").unwrap();
        assert_eq!(later.scroll_position(section, 800.0), 500.0);

        let end = TriggerPoint::parse("bottom top").unwrap();
        assert_eq!(end.scroll_position(section, 800.0), 1600.0);
    }

    #[test]
    fn scrub_progress_clamps() {
        assert_eq!(scrub_progress(100.0, 300.0, 0.0), 0.0);
        assert_eq!(scrub_progress(100.0, 300.0, 200.0), 0.5);
        assert_eq!(scrub_progress(100.0, 300.0, 900.0), 1.0);
        assert_eq!(scrub_progress(100.0, 100.0, 100.0), 1.0);
    }
}
