//! Argument vector for the key generator.

use crate::request::GenerationRequest;
use std::ffi::OsString;

/// One flag and one value per request field, in a fixed order:
/// `-t type -b bits -C comment -N passphrase -f location -m format`.
pub fn build_args(request: &GenerationRequest) -> Vec<OsString> {
    vec![
        "-t".into(),
        request.key_type.clone().into(),
        "-b".into(),
        request.bit_size.clone().into(),
        "-C".into(),
        request.comment.clone().into(),
        "-N".into(),
        request.passphrase.clone().into(),
        "-f".into(),
        request.location.clone().into_os_string(),
        "-m".into(),
        request.output_format.as_str().into(),
    ]
}

/// Arguments with the passphrase value masked, for logging.
///
/// Arguments come in flag/value pairs, so only the value slot of a `-N` flag is
/// masked. A comment or key type that reads `-N` is a value and stays visible.
pub fn redacted_args(args: &[OsString]) -> Vec<String> {
    args.chunks(2)
        .flat_map(|pair| {
            let flag = pair[0].to_string_lossy().into_owned();
            let value = pair.get(1).map(|value| {
                if pair[0] == "-N" {
                    "<redacted>".to_string()
                } else {
                    value.to_string_lossy().into_owned()
                }
            });
            std::iter::once(flag).chain(value)
        })
        .collect()
}
