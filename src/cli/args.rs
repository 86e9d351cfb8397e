use std::ffi::OsString;

const CT_SHORTHAND: &str = "-ct";
const CONTENT_TYPE_FLAG: &str = "--content-type";

/// Rewrite the `-ct` / `-ct=value` shorthand to `--content-type` before parsing.
///
/// Only exact matches are rewritten; arguments that are not valid UTF-8 pass through.
pub fn normalize_ct_shorthand<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            let rewritten = match arg.to_str() {
                Some(CT_SHORTHAND) => Some(CONTENT_TYPE_FLAG.to_string()),
                Some(s) => s
                    .strip_prefix("-ct=")
                    .map(|value| format!("{}={}", CONTENT_TYPE_FLAG, value)),
                None => None,
            };
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

/// Split comma-separated values, trimming each piece and dropping empty ones.
pub fn split_csv<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
