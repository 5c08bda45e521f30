use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

/// Stack-allocated action argument storage; most actions take well under
/// four positional arguments.
pub type ArgVec = SmallVec<[String; 4]>;

/// Trailing format suffix: a `.word` preceded by a character that is
/// neither a slash nor a dot. The head group is greedy, so `a.b.json`
/// splits into `a.b` and `json`; a bare `.ext` never matches.
static FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*[^/.])\.(\w+)$").expect("invalid format regex"));

/// Split an unconsumed path remainder into action name, positional args
/// and an optional response format.
///
/// The empty remainder maps to `("index", [], None)`. Otherwise the
/// optional format suffix is stripped first, then the rest splits on `/`:
/// the first segment is the action, every following segment an argument.
/// Empty segments are not filtered out, so trailing slashes become
/// trailing empty-string arguments.
#[must_use]
pub fn extract_action_and_args(remainder: &str) -> (String, ArgVec, Option<String>) {
    if remainder.is_empty() {
        return ("index".to_string(), ArgVec::new(), None);
    }

    let (rest, format) = match FORMAT_RE.captures(remainder) {
        Some(caps) => (caps[1].to_string(), Some(caps[2].to_string())),
        None => (remainder.to_string(), None),
    };

    let mut segments = rest.split('/');
    let action = segments.next().unwrap_or_default().to_string();
    let args: ArgVec = segments.map(str::to_string).collect();

    (action, args, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(remainder: &str) -> (String, Vec<String>, Option<String>) {
        let (action, args, format) = extract_action_and_args(remainder);
        (action, args.into_vec(), format)
    }

    #[test]
    fn test_empty_remainder_is_index() {
        assert_eq!(extract(""), ("index".into(), vec![], None));
    }

    #[test]
    fn test_action_with_args() {
        assert_eq!(
            extract("show/1/2"),
            ("show".into(), vec!["1".into(), "2".into()], None)
        );
    }

    #[test]
    fn test_format_suffix() {
        assert_eq!(extract("index.xml"), ("index".into(), vec![], Some("xml".into())));
        assert_eq!(
            extract("a/b.ext"),
            ("a".into(), vec!["b".into()], Some("ext".into()))
        );
        assert_eq!(extract("a/b"), ("a".into(), vec!["b".into()], None));
    }

    #[test]
    fn test_greedy_multi_dot_split() {
        assert_eq!(
            extract("a.b.json"),
            ("a.b".into(), vec![], Some("json".into()))
        );
    }

    #[test]
    fn test_bare_extension_is_not_a_format() {
        assert_eq!(extract(".ext"), (".ext".into(), vec![], None));
    }

    #[test]
    fn test_trailing_slashes_become_empty_args() {
        assert_eq!(
            extract("wiki///"),
            ("wiki".into(), vec!["".into(), "".into(), "".into()], None)
        );
    }

    #[test]
    fn test_trailing_slash_blocks_format_extraction() {
        assert_eq!(
            extract("show.json/"),
            ("show.json".into(), vec!["".into()], None)
        );
    }

    #[test]
    fn test_internal_empty_segments_pass_through() {
        assert_eq!(
            extract("show///1"),
            ("show".into(), vec!["".into(), "".into(), "1".into()], None)
        );
    }
}
