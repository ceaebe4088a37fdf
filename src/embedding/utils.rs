use std::io;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};

/// Loads a tokenizer from a model directory, a model file (sibling
/// `tokenizer.json`), or an explicit `*.json` tokenizer path.
pub fn load_tokenizer(path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if path
        .extension()
        .is_some_and(|ext| ext == std::ffi::OsStr::new("json"))
    {
        path.to_path_buf()
    } else if path.is_dir() {
        path.join("tokenizer.json")
    } else {
        path.parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "model path has no parent"))?
            .join("tokenizer.json")
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates every encoding to `max_len` tokens.
pub fn load_tokenizer_with_truncation(path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("failed to configure truncation: {e}")))?;

    Ok(tokenizer)
}

/// Scales `values` to unit L2 norm in place. Zero vectors are left alone.
pub fn l2_normalize(values: &mut [f32]) {
    let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in values.iter_mut() {
            *x /= norm;
        }
    }
}
