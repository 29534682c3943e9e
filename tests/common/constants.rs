//! Shared constants for end-to-end tests
//!
//! When the fixture dataset changes, update only this file and fixtures.rs.

// ============================================================================
// Fixture Campaign IDs
// ============================================================================

/// Active Nike campaign with two metric rows (ROI 3.0 and 5.0)
pub const NIKE_CAMPAIGN_1_ID: &str = "camp-nike-1";

/// Active Nike campaign without metrics, created most recently
pub const NIKE_CAMPAIGN_2_ID: &str = "camp-nike-2";

/// Paused Nike campaign without metrics
pub const NIKE_CAMPAIGN_3_ID: &str = "camp-nike-3";

/// Completed Apple campaign with one old metric row
pub const APPLE_CAMPAIGN_ID: &str = "camp-apple-1";

pub const NIKE_BRAND: &str = "Nike";
pub const APPLE_BRAND: &str = "Apple";

/// Best performing asset of NIKE_CAMPAIGN_1_ID
pub const TOP_ASSET_ID: &str = "asset-hero";

// ============================================================================
// Monitor API stub
// ============================================================================

pub const MONITOR_TOKEN: &str = "test-token";

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
