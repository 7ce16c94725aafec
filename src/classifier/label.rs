/// Three-way bucket for the service's free-form verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Real,
    Fake,
    Unverified,
}

impl Verdict {
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Verdict::Real)
    }

    #[inline]
    pub fn is_fake(&self) -> bool {
        matches!(self, Verdict::Fake)
    }
}

const REAL_MARKERS: &[&str] = &["real", "true"];
const FAKE_MARKERS: &[&str] = &["fake", "false"];

/// Case-insensitive substring match. Real markers win over fake markers,
/// anything else (including a missing label) is `Unverified`.
pub fn classify(label: Option<&str>) -> Verdict {
    let Some(label) = label else {
        return Verdict::Unverified;
    };

    let lower = label.to_lowercase();

    if REAL_MARKERS.iter().any(|m| lower.contains(m)) {
        return Verdict::Real;
    }

    if FAKE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Verdict::Fake;
    }

    Verdict::Unverified
}
