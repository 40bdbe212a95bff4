//! ID 生成 Outbound ポート
//!
//! レコード ID はサービス側からは供給されないため、クライアント側で必ず採番する。

/// 一意 ID を生成する抽象
///
/// 実装は `common::adapter::StdIdGenerator`（時刻 + シーケンスの base62）など。
/// 同一プロセス内で呼び出しごとに異なる ID を返すことが契約。
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
