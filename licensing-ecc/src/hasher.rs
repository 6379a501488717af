use sha2::{Digest, Sha256};

/// Streaming SHA-256 over a message split into several buffers.
///
/// Feeding the parts one by one yields the same digest as hashing their
/// concatenation, without ever building it.
#[derive(Clone, Default)]
pub struct MessageHasher {
    hasher: Sha256,
}

impl MessageHasher {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    pub fn insert(&mut self, part: &[u8]) {
        self.hasher.update(part);
    }

    pub fn insert_parts<I>(&mut self, parts: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for part in parts {
            self.hasher.update(part.as_ref());
        }
    }

    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }
}

pub fn digest_parts<I>(parts: I) -> [u8; 32]
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut hasher = MessageHasher::new();
    hasher.insert_parts(parts);
    hasher.finalize()
}

#[cfg(test)]
mod test {
    use super::*;

    const QUOTE: &[u8] = b"Friends are the adventures of life. - MacGyver";
    const QUOTE_DIGEST: &str = "41ebb47ede917c9502640fbe0f9cf7f250a62844ebadabe663dc22fab831deb1";

    #[test]
    fn single_buffer() {
        assert_eq!(hex::encode(digest_parts([QUOTE])), QUOTE_DIGEST);
    }

    #[test]
    fn split_buffers_match_concatenation() {
        let (head, tail) = QUOTE.split_at(26);
        assert_eq!(hex::encode(digest_parts([head, tail])), QUOTE_DIGEST);

        let mut hasher = MessageHasher::new();
        for byte in QUOTE.chunks(1) {
            hasher.insert(byte);
        }
        hasher.insert(&[]);
        assert_eq!(hex::encode(hasher.finalize()), QUOTE_DIGEST);
    }

    #[test]
    fn empty_message() {
        let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(hex::encode(digest_parts(Vec::<Vec<u8>>::new())), expected);
        assert_eq!(hex::encode(MessageHasher::default().finalize()), expected);
    }
}
