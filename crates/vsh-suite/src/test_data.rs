//! Expected values for the demo organization.

/// Slide overview counters on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideOverview {
    /// Total WSI slides scanned
    pub scanning: &'static str,
    /// Total VSI slides stained
    pub staining: &'static str,
    /// Total downloads
    pub downloads: &'static str,
    /// Date slider start
    pub slider_start: &'static str,
    /// Date slider end
    pub slider_end: &'static str,
}

/// Dashboard counters for a fresh organization
pub const SLIDE_OVERVIEW: SlideOverview = SlideOverview {
    scanning: "0",
    staining: "0",
    downloads: "0",
    slider_start: "0",
    slider_end: "0",
};

/// Processing/completed/failed counts of one stain type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StainCounts {
    /// Jobs in progress
    pub processing: u32,
    /// Jobs completed
    pub completed: u32,
    /// Jobs failed
    pub failed: u32,
}

/// One row of the staining usage table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StainingRow {
    /// Row label as rendered
    pub label: &'static str,
    /// Expected counts
    pub counts: StainCounts,
}

const ZERO: StainCounts = StainCounts {
    processing: 0,
    completed: 0,
    failed: 0,
};

/// Staining usage rows, top to bottom
pub const STAINING_ROWS: [StainingRow; 4] = [
    StainingRow { label: "IHC", counts: ZERO },
    StainingRow { label: "Special", counts: ZERO },
    StainingRow { label: "H&E", counts: ZERO },
    StainingRow { label: "Total", counts: ZERO },
];

/// Support request categories, in dropdown order
pub const ISSUE_CATEGORIES: [&str; 6] = [
    "Platform Issue - Bug",
    "Platform Issue - Usability",
    "Stain Issue",
    "User Account Issue",
    "Billing Issue",
    "General / Feature Request",
];
