//! Lanxin API status codes

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Code returned by the webhook when a message was accepted
pub const STATUS_OK: i64 = 0;

static STATUS_CODES: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0, "OK"),
        (10000, "API 服务不可得"),
        (-1, "缺少 APP_TOKEN"),
        (-2, "缺少 USER_TOKEN"),
        (-3, "无效的 APP_TOKEN"),
        (-4, "无效的 USER_TOKEN"),
        (-5, "API 请求路径错误"),
        (-6, "缺少 SYNC_TOKEN"),
        (-7, "无效的 SYNC_TOKEN"),
        (-8, "缺少 HOOK_TOKEN"),
        (-9, "无效的 HOOK_TOKEN"),
        (-100, "JSON序列化错误"),
        (-101, "JSON反序列化错误"),
        (10001, "API RPC 服务不可得"),
        (10002, "AUTH认证失败"),
        (10003, "无效的请求"),
        (10004, "API服务 不支持"),
        (10005, "API服务 无权限 接口权限"),
        (10006, "API服务 版本检查失败"),
        (10007, "API服务 数据冲突"),
        (10008, "API服务 数据不存在"),
        (40013, "请求参数缺少appid"),
        (40015, "API 请求参数数目错误"),
        (40016, "API 请求参数 grant_type 类型错误"),
        (40017, "API 请求参数 secret 错误"),
        (40018, "APP Secret错误"),
        (40019, "appId不匹配"),
        (40030, "无效的API TOKEN"),
        (40031, "API 访问中缺少API TOKEN 参数"),
        (40032, "API 访问中缺少 CODE 参数"),
        (40033, "API 访问中缺少 uri 参数"),
        (40035, "无效的USER TOKEN"),
        (40036, "CODE非法"),
        (40040, "API 访问缺少userid 参数"),
        (40059, "不支持该Content-Type"),
        (40060, "消息为空或格式错"),
        (40061, "消息URL为空或格式错"),
        (40062, "消息接收者为空或格式错"),
        (40070, "消息更新失败"),
        (45000, "请求参数错误"),
        (45001, "请求头信息错误"),
        (59000, "bot 不存在"),
        (59001, "bot 已停用"),
        (59002, "安全认证不通过"),
    ])
});

/// Description of a Lanxin status code, if it is a known one.
pub fn describe(code: i64) -> Option<&'static str> {
    STATUS_CODES.get(&code).copied()
}

/// Like [`describe`], with a fixed fallback for unknown codes.
pub fn describe_or_unknown(code: i64) -> &'static str {
    describe(code).unwrap_or("未知错误码")
}
