use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RecordedRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub role_label: String,
    pub center: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreateData {
    pub message: String,
    pub user: UserRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersListData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub rows: Vec<UserRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CentersData {
    pub centers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRow {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub record_id: String,
    pub record_date: String,
    pub name: String,
    pub phone: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordsAddData {
    pub username: String,
    pub date: String,
    pub added: i64,
    pub skipped: i64,
    pub total_for_day: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordsListData {
    pub username: String,
    pub date: String,
    pub today: String,
    pub total: i64,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreakDay {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusData {
    pub username: String,
    pub role: String,
    pub role_label: String,
    pub center: String,
    pub today: String,
    pub today_count: i64,
    pub policy_version: String,
    pub is_active: bool,
    pub streak_status_text: String,
    pub current_limit: i64,
    pub streak: Vec<StreakDay>,
    pub recorded_range: RecordedRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct CenterMemberRow {
    pub username: String,
    pub status: String,
    pub is_active: bool,
    pub current_limit: i64,
    pub count: i64,
    pub customers: Vec<CustomerRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CenterData {
    pub center: String,
    pub today: String,
    pub selected_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub is_admin_view: bool,
    pub rows: Vec<CenterMemberRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
    pub window_start: String,
    pub window_end: String,
    pub users: i64,
    pub rows_written: i64,
}
