// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 从链接地址中提取路径部分作为列表项的键
///
/// 查询参数和片段被丢弃；无法解析的地址返回 `None`
pub fn path_key(base_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    resolve_url(base_url, href)
        .ok()
        .map(|url| url.path().to_string())
}

/// 判断当前路径是否命中激活前缀
pub fn path_allowed<S: AsRef<str>>(path: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_ref()))
}
