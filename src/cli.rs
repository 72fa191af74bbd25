//! Command line helpers
//!
//! The options are spelled with a single dash, as in `-emisField` or `-xaxis_min`. Before being
//! handed to structopt, these are rewritten into long options (`--emisField`). Short flags (`-h`),
//! negative numbers (`-10.0`, `-inf`) and everything after `--` are left alone.

/// Rewrites single dash long options into double dash long options
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<String> = args.next().into_iter().collect();
    let mut verbatim = false;
    for arg in args {
        if verbatim {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            verbatim = true;
            normalized.push(arg);
            continue;
        }
        if arg.parse::<f64>().is_ok() {
            normalized.push(arg);
            continue;
        }
        let mut chars = arg.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('-'), Some(c), Some(_)) if c.is_ascii_alphabetic() => {
                normalized.push(format!("-{arg}"))
            }
            _ => normalized.push(arg),
        }
    }
    normalized
}
