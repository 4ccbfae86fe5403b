//! Slug generation shared by every named entity in the catalog.
//!
//! A slug is the lowercase, hyphenated, URL-safe identifier derived from a
//! human-readable name. Uniqueness is scoped by the consumer: global for
//! games and catalog entities, per-owner for custom lists. Collision
//! handling is the consumer's job; this module only provides the
//! deterministic base form and the counter-suffix scan used by list slugs.

/// Converts a display name into its slug form.
///
/// Lowercases the input, replaces every run of characters outside
/// `[a-z0-9]` with a single hyphen and strips leading/trailing hyphens.
/// Returns an empty string when nothing survives; callers must supply
/// their own fallback in that case.
///
/// # Examples
///
/// ```rust
/// use ludarr::slug::slugify;
///
/// assert_eq!(slugify("The Witcher 3: Wild Hunt"), "the-witcher-3-wild-hunt");
/// assert_eq!(slugify("  NieR:Automata  "), "nier-automata");
/// assert_eq!(slugify("!!!"), "");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Picks the first free slug in the sequence `base`, `base-1`, `base-2`, …
///
/// `taken` holds the slugs already present in the uniqueness scope (an
/// owner's other lists). The scan terminates because `taken` is finite and
/// the counter strictly increases.
#[must_use]
pub fn dedup_with_counter(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|s| s == base) {
        return base.to_string();
    }

    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken.iter().any(|s| *s == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Hollow Knight"), "hollow-knight");
        assert_eq!(slugify("DOOM (2016)"), "doom-2016");
        assert_eq!(slugify("Baldur's Gate 3"), "baldur-s-gate-3");
    }

    #[test]
    fn slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("--  A ** B  --"), "a-b");
        assert_eq!(slugify("...leading dots"), "leading-dots");
        assert_eq!(slugify("trailing dots..."), "trailing-dots");
    }

    #[test]
    fn slugify_non_ascii_becomes_separator() {
        // Non-ASCII letters are outside [a-z0-9] and collapse into hyphens.
        assert_eq!(slugify("Pokémon Red"), "pok-mon-red");
    }

    #[test]
    fn slugify_empty_results() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("★☆★"), "");
    }

    #[test]
    fn counter_dedup_sequence() {
        let taken = vec![
            "my-favorites".to_string(),
            "my-favorites-1".to_string(),
            "my-favorites-2".to_string(),
        ];
        assert_eq!(dedup_with_counter("my-favorites", &taken), "my-favorites-3");
        assert_eq!(dedup_with_counter("backlog", &taken), "backlog");
    }

    #[test]
    fn counter_dedup_skips_holes() {
        // A freed slot in the middle is reused; only presence matters.
        let taken = vec!["base".to_string(), "base-2".to_string()];
        assert_eq!(dedup_with_counter("base", &taken), "base-1");
    }
}
