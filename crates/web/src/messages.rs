//! User-facing text.
//!
//! Every notification and inline message shown by the pages lives here so the
//! handlers and the tests agree on the exact wording.

/// Title of every error notification.
pub const ERROR_TITLE: &str = "ข้อผิดพลาด";
/// Title of every success notification.
pub const SUCCESS_TITLE: &str = "สำเร็จ!";

// PIN check

/// Check pressed with fewer than six digits.
pub const PIN_INCOMPLETE: &str = "กรุณาใส่รหัส PIN ให้ครบ 6 หลัก";
/// Title shown when no active record matched.
pub const PIN_MISMATCH_TITLE: &str = "ไม่สำเร็จ";
/// No active record matched.
pub const PIN_MISMATCH: &str = "รหัส PIN ไม่ถูกต้อง";
/// Shown on success when the record has no description.
pub const PIN_MATCH: &str = "รหัส PIN ถูกต้อง";
/// The lookup itself failed.
pub const PIN_CHECK_FAILED: &str = "เกิดข้อผิดพลาดในการตรวจสอบ";

// PIN administration

/// Candidate code is not six characters long.
pub const PIN_LENGTH: &str = "รหัส PIN ต้องมี 6 หลักเท่านั้น";
/// Candidate code contains something other than digits.
pub const PIN_DIGITS_ONLY: &str = "รหัส PIN ต้องเป็นตัวเลขเท่านั้น";
/// Candidate code is already on the active list.
pub const PIN_DUPLICATE: &str = "รหัส PIN นี้มีอยู่ในระบบแล้ว";
pub const PIN_ADDED: &str = "เพิ่มรหัส PIN ใหม่แล้ว";
pub const PIN_DEACTIVATED: &str = "ลบรหัส PIN แล้ว";
pub const PIN_ADD_FAILED: &str = "เกิดข้อผิดพลาดในการเพิ่มรหัส PIN";
pub const PIN_DEACTIVATE_FAILED: &str = "เกิดข้อผิดพลาดในการลบรหัส PIN";
pub const PIN_LIST_FAILED: &str = "เกิดข้อผิดพลาดในการโหลดรหัส PIN";

// Admin session

pub const LOGIN_TITLE: &str = "เข้าสู่ระบบสำเร็จ";
pub const LOGIN_WELCOME: &str = "ยินดีต้อนรับเข้าสู่ระบบผู้คุม";
/// Same text for an unknown email and for a wrong password.
pub const LOGIN_INVALID: &str = "อีเมลหรือรหัสผ่านไม่ถูกต้อง";
pub const LOGIN_FAILED: &str = "เกิดข้อผิดพลาดในการเข้าสู่ระบบ";
pub const LOGOUT_TITLE: &str = "ออกจากระบบแล้ว";
pub const LOGOUT_THANKS: &str = "ขอบคุณที่ใช้บริการ";

/// Placeholder while the session store cannot be read.
pub const LOADING: &str = "กำลังโหลด...";
