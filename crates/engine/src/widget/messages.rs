//! User-facing strings (Thai locale)

use liffpoints_core::Points;

pub const SERVER_UNREACHABLE: &str = "ไม่สามารถเชื่อมต่อเซิร์ฟเวอร์ได้";
pub const REDEEM_REJECTED: &str = "ไม่สามารถแลกรหัสได้";
pub const PROFILE_LOAD_FAILED: &str = "ไม่สามารถโหลดโปรไฟล์ได้";
pub const SEND_FAILED: &str = "ส่งข้อความไม่สำเร็จ";
pub const POINTS_PLACEHOLDER: &str = "...";

pub fn redeem_success(added: Points) -> String {
    format!("แลกรหัสสำเร็จ! ได้รับ {} แต้ม", added)
}

pub fn greeting(display_name: &str) -> String {
    format!("สวัสดี {} จาก LIFF!", display_name)
}
