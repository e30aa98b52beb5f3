/// Status phrases for the loading overlay, one per 15-point progress bucket.
pub const LOADING_PHRASES: [&str; 7] = [
    "Initializing Neural Core",
    "Syncing Quantum Matrix",
    "Loading Neural Pathways",
    "Calibrating AI Systems",
    "Establishing Neural Links",
    "Synchronizing Protocols",
    "System Ready",
];

/// Width of a progress bucket selecting the next phrase.
pub const PHRASE_BUCKET_WIDTH: u8 = 15;

pub const LOADING_TICK_INTERVAL_MS: u64 = 50;
pub const LOADING_TOTAL_STEPS: u32 = 100;

/// Pause between reaching 100 and releasing the page.
pub const LOADING_SETTLE_DELAY_MS: u64 = 1000;

/// Relative path of the scene manifest inside the asset folder.
pub const SCENE_MANIFEST_PATH: &str = "landing/manifest.json";
