// ABOUTME: Centralized constants for the kitty graphics protocol and pipeline defaults
// ABOUTME: Contains escape sequences, chunk sizing, format codes and environment names

/// Kitty graphics protocol framing
pub mod protocol {
    /// Maximum base64 characters carried by a single escape sequence
    pub const CHUNK_SIZE: usize = 4096;

    /// APC introducer followed by the graphics command letter
    pub const APC_START: &str = "\x1b_G";

    /// String terminator closing the APC sequence
    pub const APC_END: &str = "\x1b\\";

    /// `f=100`: payload is a PNG file
    pub const FORMAT_PNG: u32 = 100;
}

/// Environment variables read at runtime
pub mod env {
    /// Overrides the terminal pixel query, formatted `<width>x<height>`
    pub const WINDOW_PIXELS: &str = "KITCAT_WINDOW_PIXELS";
}
