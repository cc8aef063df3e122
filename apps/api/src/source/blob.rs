use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    Upload { file_name: String },
    Remote { url: String },
}

/// In-memory handle to a source document.
///
/// Owned by exactly one extraction. Dropping it releases the buffer; the pipeline
/// consumes the blob so release happens on success, error and unwind alike.
#[derive(Debug)]
pub struct SourceBlob {
    id: Uuid,
    origin: SourceOrigin,
    data: Bytes,
}

impl SourceBlob {
    pub fn new(data: Bytes, origin: SourceOrigin) -> Self {
        let id = Uuid::new_v4();
        debug!(%id, bytes = data.len(), ?origin, "source blob acquired");
        Self { id, origin, data }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

impl Drop for SourceBlob {
    fn drop(&mut self) {
        debug!(id = %self.id, bytes = self.data.len(), "source blob released");
    }
}
