//! Device capability heuristics for decorative effects

use serde::Serialize;

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// What is known about the host device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceProfile {
    /// Approximate memory in GB, when the host reports it
    pub memory_gb: Option<f64>,
    /// Logical CPU count, when known
    pub cores: Option<usize>,
    pub mobile: bool,
}

impl DeviceProfile {
    /// Profile of the machine this process runs on
    pub fn detect() -> Self {
        Self {
            memory_gb: None,
            cores: std::thread::available_parallelism().ok().map(|n| n.get()),
            mobile: false,
        }
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.mobile = is_mobile_user_agent(user_agent);
        self
    }

    /// 4 GB or less, 4 cores or fewer, or a mobile device
    pub fn is_low_end(&self) -> bool {
        if matches!(self.memory_gb, Some(m) if m > 0.0 && m <= 4.0) {
            return true;
        }
        if matches!(self.cores, Some(c) if c > 0 && c <= 4) {
            return true;
        }
        self.mobile
    }

    pub fn detail_level(&self) -> DetailLevel {
        if self.is_low_end() {
            DetailLevel::LOW
        } else {
            DetailLevel::HIGH
        }
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_MARKERS.iter().any(|m| ua.contains(m))
}

/// Rendering budget for decorative scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetailLevel {
    pub particle_count: usize,
    pub sphere_detail: u32,
    pub enable_shadows: bool,
    pub enable_post_processing: bool,
    /// Upper bound on device pixel ratio
    pub max_dpr: u8,
}

impl DetailLevel {
    pub const LOW: DetailLevel = DetailLevel {
        particle_count: 50,
        sphere_detail: 8,
        enable_shadows: false,
        enable_post_processing: false,
        max_dpr: 1,
    };

    pub const HIGH: DetailLevel = DetailLevel {
        particle_count: 200,
        sphere_detail: 32,
        enable_shadows: true,
        enable_post_processing: true,
        max_dpr: 2,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_end_rules() {
        let strong = DeviceProfile {
            memory_gb: Some(16.0),
            cores: Some(12),
            mobile: false,
        };
        assert!(!strong.is_low_end());
        assert_eq!(strong.detail_level(), DetailLevel::HIGH);

        let low_memory = DeviceProfile {
            memory_gb: Some(4.0),
            ..strong.clone()
        };
        assert!(low_memory.is_low_end());

        let few_cores = DeviceProfile {
            cores: Some(4),
            ..strong.clone()
        };
        assert_eq!(few_cores.detail_level(), DetailLevel::LOW);

        let phone = strong.with_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)");
        assert!(phone.is_low_end());
    }

    #[test]
    fn test_unknown_profile_is_not_low_end() {
        assert!(!DeviceProfile::default().is_low_end());
    }

    #[test]
    fn test_user_agent_matching() {
        assert!(is_mobile_user_agent("Opera Mini/8.0"));
        assert!(!is_mobile_user_agent("Mozilla/5.0 (X11; Linux x86_64)"));
    }
}
