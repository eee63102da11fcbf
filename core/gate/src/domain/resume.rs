//! 外部インタラクションからの再開イベント

/// 外部リクエストの相関 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub i32);

/// パイプラインが予約している唯一のリクエスト ID。
/// 待機中の checker は常に 1 つなので定数で足りる。
pub const PIPELINE_REQUEST_ID: RequestId = RequestId(250);

/// 権限ごとの許可結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantResult {
    Granted,
    Denied,
}

/// 外部アクティビティの結果コード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Canceled,
}

impl ResultCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, ResultCode::Ok)
    }
}

/// ホストからパイプラインへ届く再開イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeEvent {
    /// 同意プロンプトの回答
    Consent { agree: bool },
    /// 権限リクエストの結果（permissions と grant_results は同じ順序）
    PermissionGrant {
        request_id: RequestId,
        permissions: Vec<String>,
        grant_results: Vec<GrantResult>,
    },
    /// ロール要求など外部アクティビティの結果
    ExternalResult {
        request_id: RequestId,
        result_code: ResultCode,
    },
}
