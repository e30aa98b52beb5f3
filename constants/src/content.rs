use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TokenStat {
    pub label: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TokenDetail {
    pub label: &'static str,
    pub value: &'static str,
}

/// Share of the token supply, drawn as a gradient bar.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Allocation {
    pub title: &'static str,
    pub percentage: f32,
    pub description: &'static str,
    /// sRGB gradient endpoints.
    pub gradient_from: [f32; 3],
    pub gradient_to: [f32; 3],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoadmapStep {
    pub title: &'static str,
    pub steps: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SocialLink {
    pub name: &'static str,
    pub href: &'static str,
}

/// Everything the page renders, grouped for the host bridge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageContent {
    pub name: &'static str,
    pub symbol: &'static str,
    pub tagline: &'static str,
    pub navigation: &'static [NavItem],
    pub features: &'static [Feature],
    pub stats: &'static [TokenStat],
    pub details: &'static [TokenDetail],
    pub allocations: &'static [Allocation],
    pub roadmap: &'static [RoadmapStep],
    pub socials: &'static [SocialLink],
}

pub const NAVIGATION: [NavItem; 3] = [
    NavItem { name: "About", href: "#about" },
    NavItem { name: "Tokenomics", href: "#tokenomics" },
    NavItem { name: "Roadmap", href: "#roadmap" },
];

pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "Neural Networks",
        description: "Advanced AI algorithms powering intelligent decision-making and pattern recognition.",
    },
    Feature {
        title: "Real-time Processing",
        description: "Lightning-fast data processing and analysis for immediate insights.",
    },
    Feature {
        title: "Secure Architecture",
        description: "Enterprise-grade security ensuring data protection and privacy.",
    },
    Feature {
        title: "Community Driven",
        description: "Built by the community, for the community, with decentralized governance.",
    },
];

pub const TOKEN_STATS: [TokenStat; 2] = [
    TokenStat { label: "Total Holders", value: 15_000 },
    TokenStat { label: "Market Cap", value: 1_000_000 },
];

pub const TOKEN_DETAILS: [TokenDetail; 4] = [
    TokenDetail { label: "Contract Address", value: "DfgT54GdfgER4536fghGFH567hgfhgf45645gfhgfhfg" },
    TokenDetail { label: "Total Supply", value: "1,000,000,000" },
    TokenDetail { label: "Network", value: "Solana" },
    TokenDetail { label: "Decimals", value: "9" },
];

pub const ALLOCATIONS: [Allocation; 4] = [
    Allocation {
        title: "Presale",
        percentage: 40.0,
        description: "Initial token distribution through public and private sales to early supporters and investors.",
        gradient_from: [0.66, 0.33, 0.97],
        gradient_to: [0.93, 0.28, 0.60],
    },
    Allocation {
        title: "Liquidity",
        percentage: 30.0,
        description: "Locked liquidity to ensure stable trading and long-term sustainability.",
        gradient_from: [0.23, 0.51, 0.96],
        gradient_to: [0.02, 0.71, 0.83],
    },
    Allocation {
        title: "Development",
        percentage: 20.0,
        description: "Reserved for ongoing platform development, technical improvements, and innovation.",
        gradient_from: [0.13, 0.77, 0.37],
        gradient_to: [0.06, 0.73, 0.51],
    },
    Allocation {
        title: "Marketing",
        percentage: 10.0,
        description: "Allocated for marketing initiatives, partnerships, and community growth.",
        gradient_from: [0.98, 0.80, 0.08],
        gradient_to: [0.98, 0.45, 0.09],
    },
];

pub const ROADMAP: [RoadmapStep; 4] = [
    RoadmapStep { title: "CREATE A NEW SKETCH", steps: &["Touch LH thumbstick", "Move up"] },
    RoadmapStep { title: "CREATING A VOXEL", steps: &["Point at any voxel", "Press the trigger"] },
    RoadmapStep {
        title: "COLOR THEM",
        steps: &["Pick color on the RH thumbstick", "Select a voxel", "Press the \"Paint\" button"],
    },
    RoadmapStep {
        title: "EXPORT YOUR MODEL",
        steps: &["Go to \"Library\"", "Open the context menu", "Tap \"Export\"", "Find .OBJ file on your disk"],
    },
];

pub const SOCIAL_LINKS: [SocialLink; 6] = [
    SocialLink { name: "Twitter", href: "https://twitter.com" },
    SocialLink { name: "Telegram", href: "https://t.me" },
    SocialLink { name: "DEXScreener", href: "https://dexscreener.com" },
    SocialLink { name: "CoinGecko", href: "https://coingecko.com" },
    SocialLink { name: "Uniswap", href: "https://uniswap.org" },
    SocialLink { name: "Etherscan", href: "https://etherscan.io" },
];

pub const PAGE_CONTENT: PageContent = PageContent {
    name: "RUG2",
    symbol: "$RUG2",
    tagline: "The Ultimate Memecoin for Web3 Enthusiasts",
    navigation: &NAVIGATION,
    features: &FEATURES,
    stats: &TOKEN_STATS,
    details: &TOKEN_DETAILS,
    allocations: &ALLOCATIONS,
    roadmap: &ROADMAP,
    socials: &SOCIAL_LINKS,
};
