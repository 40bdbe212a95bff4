//! テスト用: 固定の結果を返す KeywordGenerator 実装

#[cfg(test)]
mod stub {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::{KeywordRecord, SeedKeyword};
    use crate::ports::outbound::{GenerationError, KeywordGenerator};

    /// テスト用: あらかじめ渡された結果を順に返す Stub
    ///
    /// 呼び出し回数も記録する（クレデンシャルガードの検証用）。
    pub struct StubKeywordGenerator {
        results: Mutex<Vec<Result<Vec<KeywordRecord>, GenerationError>>>,
        calls: AtomicUsize,
    }

    impl StubKeywordGenerator {
        pub fn new(results: Vec<Result<Vec<KeywordRecord>, GenerationError>>) -> Self {
            Self {
                results: Mutex::new(results),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn once(result: Result<Vec<KeywordRecord>, GenerationError>) -> Self {
            Self::new(vec![result])
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl KeywordGenerator for StubKeywordGenerator {
        fn generate(
            &self,
            _seed: &SeedKeyword,
            _count: u8,
        ) -> Result<Vec<KeywordRecord>, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                return Err(GenerationError::Transient(
                    "stub has no more results".to_string(),
                ));
            }
            results.remove(0)
        }
    }
}

#[cfg(test)]
pub use stub::StubKeywordGenerator;
