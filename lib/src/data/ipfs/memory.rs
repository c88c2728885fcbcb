//! In-memory media storage for tests and mock mode

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;

use super::{MediaResult, MediaStorage};

/// In-memory implementation of [`MediaStorage`]
#[derive(Default)]
pub struct InMemoryMediaStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cid: &str) -> bool {
        self.objects.read().contains_key(cid)
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl MediaStorage for InMemoryMediaStore {
    async fn store(&self, _filename: &str, bytes: Vec<u8>) -> MediaResult<String> {
        let cid = format!("Qm{}", hex::encode(rand::thread_rng().gen::<[u8; 16]>()));
        self.objects.write().insert(cid.clone(), bytes);

        Ok(cid)
    }
}
