//! User- and admin-facing notice texts.

pub const BAD_WORD_REJECTED: &str = "消息包含不允许的脏话，请注意言辞。";
pub const AD_WORD_REJECTED: &str = "消息包含不允许的广告内容，请勿发送广告。";
pub const FILTER_UNAVAILABLE: &str = "消息过滤服务暂不可用，请稍后再试。";
pub const BLOCKED: &str = "您的消息已被屏蔽";
pub const FORWARD_FAILED: &str = "消息转发失败，请稍后再试。";
pub const START_FAILED: &str = "获取启动消息时出错，请稍后再试。";

pub const ADMIN_USAGE: &str =
    "使用方法，回复转发的消息，并发送回复消息，或者`/block`、`/unblock`、`/checkblock`等指令";
pub const MAPPING_NOT_FOUND: &str = "未找到关联的用户消息ID";
pub const CANNOT_BLOCK_SELF: &str = "不能屏蔽自己";
pub const DEFAULT_NOTIFICATION: &str = "有新的用户消息，请及时查看。";

pub fn block_succeeded(guest_id: i64) -> String {
    format!("UID:{guest_id}屏蔽成功")
}

pub fn unblock_succeeded(guest_id: i64) -> String {
    format!("UID:{guest_id}解除屏蔽成功")
}

pub fn block_status(guest_id: i64, blocked: bool) -> String {
    if blocked {
        format!("UID:{guest_id}被屏蔽")
    } else {
        format!("UID:{guest_id}没有被屏蔽")
    }
}

pub fn fraud_alert(chat_id: i64) -> String {
    format!("检测到骗子，UID{chat_id}")
}

pub fn copy_failed(guest_id: i64, reason: &str) -> String {
    format!("消息发送给用户UID:{guest_id}失败: {reason}")
}
