//! クレデンシャル確認・取得 Outbound ポート

use common::error::Error;

/// 生成サービス用クレデンシャルのコラボレータ抽象
///
/// 実装は環境変数を確認する `adapter::CliCredentialProvider` など。
pub trait CredentialProvider: Send + Sync {
    /// 利用可能なクレデンシャルがあるか
    fn has_credential(&self) -> bool;

    /// クレデンシャルを対話的に取得する
    ///
    /// 成功後、呼び出し側は再確認せず楽観的に「利用可能」とみなす。
    /// 取得が静かに失敗していた場合は、次の生成試行で Unauthorized として表面化する。
    fn request_credential(&self) -> Result<(), Error>;
}
