//! Hashing task: hex digests of text payloads.
//!
//! `digest` takes `[algorithm, text]` and returns one result: the lowercase
//! hex digest. Supported algorithms: `sha256`, `sha384`, `sha512`. An
//! unsupported algorithm name is reported on the console channel and yields
//! no results.

use offload_core::{ConsoleLevel, TaskRegistry, Value};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Register the `digest` task function.
pub fn register(registry: &mut TaskRegistry) {
    registry.register("digest", |ctx, args| {
        let algorithm = args.first().and_then(Value::as_str).unwrap_or("sha256");
        let text = args.get(1).and_then(Value::as_str).unwrap_or("");
        match hex_digest(algorithm, text) {
            Some(digest) => vec![Value::from(digest)],
            None => {
                ctx.console(
                    ConsoleLevel::Error,
                    vec![Value::String(format!(
                        "Unsupported hash algorithm: {}. Supported: sha256, sha384, sha512",
                        algorithm
                    ))],
                );
                vec![]
            }
        }
    });
}

/// Lowercase hex digest of `text` with the named algorithm.
pub fn hex_digest(algorithm: &str, text: &str) -> Option<String> {
    let digest = match algorithm {
        "sha256" => Sha256::digest(text.as_bytes()).to_vec(),
        "sha384" => Sha384::digest(text.as_bytes()).to_vec(),
        "sha512" => Sha512::digest(text.as_bytes()).to_vec(),
        _ => return None,
    };
    Some(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex_digest("sha256", "abc").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(hex_digest("sha256", "").unwrap().len(), 64);
        assert_eq!(hex_digest("sha384", "").unwrap().len(), 96);
        assert_eq!(hex_digest("sha512", "").unwrap().len(), 128);
    }

    #[test]
    fn test_unsupported_algorithm() {
        assert!(hex_digest("md5", "abc").is_none());
    }
}
