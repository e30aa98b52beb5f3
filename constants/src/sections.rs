use serde::Serialize;

/// A vertically stacked page section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionDefinition {
    pub selector: &'static str,
    /// Height as a multiple of the viewport height.
    pub height_vh: f32,
    /// Whether the section background drifts with scroll.
    pub parallax: bool,
}

pub const SECTIONS: [SectionDefinition; 6] = [
    SectionDefinition {
        selector: "hero",
        height_vh: 1.0,
        parallax: true,
    },
    SectionDefinition {
        selector: "about",
        height_vh: 1.2,
        parallax: false,
    },
    SectionDefinition {
        selector: "token-info",
        height_vh: 1.0,
        parallax: false,
    },
    SectionDefinition {
        selector: "tokenomics",
        height_vh: 1.3,
        parallax: false,
    },
    SectionDefinition {
        selector: "roadmap",
        height_vh: 1.3,
        parallax: false,
    },
    SectionDefinition {
        selector: "footer",
        height_vh: 0.6,
        parallax: false,
    },
];

/// Index of a section in page order.
pub fn section_index(selector: &str) -> Option<usize> {
    SECTIONS.iter().position(|section| section.selector == selector)
}

/// A scroll-triggered reveal bound to one section.
///
/// Triggers use the `"<element edge> <viewport edge>"` notation, each edge
/// optionally followed by a `+=`/`-=` pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealDefinition {
    pub key: &'static str,
    pub selector: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    /// Repeatable reveals reverse when scrolled back above their start.
    pub repeatable: bool,
    pub stagger_secs: f32,
    pub duration_secs: f32,
    pub distance_px: f32,
}

pub const HEADER_BACKDROP_REVEAL: &str = "header-backdrop";
pub const TOKEN_INFO_REVEAL: &str = "token-info";
pub const TOKENOMICS_REVEAL: &str = "tokenomics";

pub const REVEALS: [RevealDefinition; 7] = [
    RevealDefinition {
        key: "hero-content",
        selector: "hero",
        start: "top 80%",
        end: "bottom top",
        repeatable: false,
        stagger_secs: 0.2,
        duration_secs: 1.0,
        distance_px: 30.0,
    },
    RevealDefinition {
        key: HEADER_BACKDROP_REVEAL,
        selector: "hero",
        start: "top+=1 top",
        end: "bottom top",
        repeatable: true,
        stagger_secs: 0.0,
        duration_secs: 0.3,
        distance_px: 0.0,
    },
    RevealDefinition {
        key: "about-text",
        selector: "about",
        start: "top center",
        end: "bottom bottom",
        repeatable: true,
        stagger_secs: 0.2,
        duration_secs: 1.0,
        distance_px: 30.0,
    },
    RevealDefinition {
        key: "about-features",
        selector: "about",
        start: "top center+=100",
        end: "bottom bottom",
        repeatable: true,
        stagger_secs: 0.1,
        duration_secs: 0.8,
        distance_px: 20.0,
    },
    RevealDefinition {
        key: TOKEN_INFO_REVEAL,
        selector: "token-info",
        start: "top 80%",
        end: "bottom top",
        repeatable: false,
        stagger_secs: 0.2,
        duration_secs: 0.6,
        distance_px: 20.0,
    },
    RevealDefinition {
        key: TOKENOMICS_REVEAL,
        selector: "tokenomics",
        start: "top 80%",
        end: "bottom top",
        repeatable: false,
        stagger_secs: 0.1,
        duration_secs: 0.5,
        distance_px: 20.0,
    },
    RevealDefinition {
        key: "roadmap-steps",
        selector: "roadmap",
        start: "top center",
        end: "bottom bottom",
        repeatable: true,
        stagger_secs: 0.3,
        duration_secs: 1.0,
        distance_px: 30.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reveal_targets_a_known_section() {
        for reveal in REVEALS {
            assert!(section_index(reveal.selector).is_some(), "{}", reveal.key);
        }
    }

    #[test]
    fn reveal_keys_are_unique() {
        for (i, a) in REVEALS.iter().enumerate() {
            assert!(REVEALS[i + 1..].iter().all(|b| b.key != a.key));
        }
    }
}
