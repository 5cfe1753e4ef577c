//! RIFF chunk lookup and PCM hashing.

/// Finds a chunk in WAV data and returns its payload offset and size.
///
/// Chunks are word aligned: an odd-sized chunk is followed by a pad byte.
pub(crate) fn find_chunk(wav_data: &[u8], chunk_id: &[u8; 4]) -> Option<(usize, usize)> {
    let mut pos = 12;

    while pos + 8 <= wav_data.len() {
        let id = &wav_data[pos..pos + 4];
        let size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        if id == chunk_id {
            return Some((pos + 8, size));
        }

        pos = pos.checked_add(8 + size + (size % 2))?;
    }

    None
}

/// Returns true if the buffer starts with a RIFF/WAVE header.
pub(crate) fn is_riff_wave(wav_data: &[u8]) -> bool {
    wav_data.len() >= 12 && &wav_data[0..4] == b"RIFF" && &wav_data[8..12] == b"WAVE"
}

/// Extracts the PCM payload from a WAV file buffer.
///
/// Returns `None` if the buffer is not a RIFF/WAVE file or has no complete
/// data chunk.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if !is_riff_wave(wav_data) {
        return None;
    }
    let (start, size) = find_chunk(wav_data, b"data")?;
    wav_data.get(start..start.checked_add(size)?)
}

/// Computes the BLAKE3 hash of a WAV file's PCM payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
