use super::{classify::ClassifyArgs, extract::ExtractArgs, refine::RefineArgs};

/// Named sets of extraction settings for common kinds of scans
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Profile {
    /// The defaults
    #[default]
    Exact,
    /// Cancels the halo the clothing rule leaves around the subject
    SafeMargin,
    /// Leaves some paper around the subject
    Padded,
    /// For scans with gray paper and lots of noise
    Aggressive,
    /// Removes sparse lines from the edges of the subject
    EdgeTrimmed,
}

impl Profile {
    pub fn args(self) -> ExtractArgs {
        let default = ExtractArgs::default();
        match self {
            Profile::Exact => default,
            Profile::SafeMargin => default.margin(-2),
            Profile::Padded => default.margin(20),
            Profile::Aggressive => default
                .margin(30)
                .classify_args(ClassifyArgs::default().white_threshold(200))
                .refine_args(
                    RefineArgs::default()
                        .refine_erode_iterations(2)
                        .refine_dilate_iterations(3),
                ),
            Profile::EdgeTrimmed => default.margin(0).edge_trim_max_background(0.1),
        }
    }
}

impl From<Profile> for ExtractArgs {
    fn from(profile: Profile) -> Self {
        profile.args()
    }
}

#[cfg(test)]
mod test {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn exact_is_the_default() {
        assert_eq!(ExtractArgs::default(), Profile::default().args());
        assert_eq!(ExtractArgs::default(), Profile::Exact.into());
    }

    #[test]
    fn profiles_differ() {
        let all = Profile::value_variants();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.args(), b.args(), "{a:?} and {b:?}");
            }
        }
    }

    #[test]
    fn names_on_the_command_line() {
        assert_eq!(
            Ok(Profile::SafeMargin),
            Profile::from_str("safe-margin", false)
        );
        assert_eq!(
            Ok(Profile::EdgeTrimmed),
            Profile::from_str("edge-trimmed", false)
        );
    }
}
