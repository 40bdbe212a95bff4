//! 保存済みキーワードの永続化 Outbound ポート

use crate::domain::KeywordRecord;

/// 保存コレクションの読み書き抽象（ベストエフォート）
///
/// どちらの操作も呼び出し側にエラーを返さない。失敗はアダプタ内でログに
/// 記録され、ユーザーに見える影響は最大でも「保存がリロード後に残らない」まで。
/// インメモリ状態が常に正で、永続化はその写し。
pub trait SavedKeywordStore: Send + Sync {
    /// 保存コレクションを読み込む。未保存・読み込み失敗時は空
    fn load(&self) -> Vec<KeywordRecord>;

    /// 保存コレクション全体を書き込む
    fn save(&self, records: &[KeywordRecord]);
}
