//! ユースケース（アプリケーション状態の所有と操作）

pub mod session;

pub use session::KeywordSession;
