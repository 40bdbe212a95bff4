//! 時刻取得 Outbound ポート

/// 現在時刻をミリ秒で返す抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定時刻モックなど。
pub trait Clock: Send + Sync {
    /// UNIX エポックからの経過ミリ秒
    fn now_ms(&self) -> u64;
}
