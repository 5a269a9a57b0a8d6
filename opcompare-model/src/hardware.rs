//! Hardware Profile
//!
//! Peak memory bandwidth and compute throughput of the device the benchmarks
//! ran on. These are the ceilings of the roofline model.

use serde::{Deserialize, Serialize};

/// Device peak rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Memory read bandwidth in bytes/s
    #[serde(default = "default_bandwidth")]
    pub read_bandwidth: f64,
    /// Memory write bandwidth in bytes/s
    #[serde(default = "default_bandwidth")]
    pub write_bandwidth: f64,
    /// Peak half-precision throughput in FLOP/s
    #[serde(default = "default_fp16_flops")]
    pub fp16_flops: f64,
    /// Peak single-precision throughput in FLOP/s
    #[serde(default = "default_fp32_flops")]
    pub fp32_flops: f64,
}

impl Default for HardwareProfile {
    fn default() -> Self {
        Self {
            read_bandwidth: default_bandwidth(),
            write_bandwidth: default_bandwidth(),
            fp16_flops: default_fp16_flops(),
            fp32_flops: default_fp32_flops(),
        }
    }
}

fn default_bandwidth() -> f64 {
    640_000_000_000.0
}
fn default_fp16_flops() -> f64 {
    195_000_000_000_000.0
}
fn default_fp32_flops() -> f64 {
    48_000_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let hw = HardwareProfile::default();
        assert_eq!(hw.read_bandwidth, 640e9);
        assert_eq!(hw.write_bandwidth, 640e9);
        assert_eq!(hw.fp16_flops, 195e12);
        assert_eq!(hw.fp32_flops, 48e12);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let hw: HardwareProfile = toml::from_str("read_bandwidth = 1e12").unwrap();
        assert_eq!(hw.read_bandwidth, 1e12);
        assert_eq!(hw.write_bandwidth, 640e9);
        assert_eq!(hw.fp32_flops, 48e12);
    }
}
