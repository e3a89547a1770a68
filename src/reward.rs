//! Discount reveal
//!
//! The code is only displayed; checkout never receives it from the game.

/// Code revealed once the player reaches the reward threshold
pub const REWARD_CODE: &str = "GOAL5";

/// Banner text shown alongside the revealed code
pub fn reward_banner(threshold: u32) -> String {
    format!(
        "Congratulations! You scored {} goals! Use code {} for $5 off your order.",
        threshold, REWARD_CODE
    )
}

/// True once `score` has reached `threshold`
#[inline]
pub fn is_unlocked(score: u32, threshold: u32) -> bool {
    score >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!is_unlocked(4, 5));
        assert!(is_unlocked(5, 5));
        assert!(is_unlocked(9, 5));
    }

    #[test]
    fn test_banner_mentions_code() {
        let banner = reward_banner(5);
        assert!(banner.contains("GOAL5"));
        assert!(banner.contains("5 goals"));
    }
}
