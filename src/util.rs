// Logging and text helpers shared by the views.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::log_1(&JsValue::from_str(msg));
    }
}

pub fn cwarn(msg: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::warn_1(&JsValue::from_str(msg));
    }
}

pub fn cerror(msg: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::error_1(&JsValue::from_str(msg));
    }
}

/// `abcdef...wxyz` style shortening; strings that already fit are returned whole.
pub fn truncate_middle(s: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= head + tail {
        return s.to_string();
    }
    let front: String = chars[..head].iter().collect();
    let back: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", front, back)
}

/// "totalPlayers" -> "total Players"
pub fn spaced_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out.trim().to_string()
}

/// Best-effort text for a thrown JS value (Error objects, strings, anything else).
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Ok(msg) = js_sys::Reflect::get(err, &JsValue::from_str("message")) {
        if let Some(s) = msg.as_string() {
            return s;
        }
    }
    format!("{:?}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_addresses() {
        let addr = "0x0123456789abcdef0123456789abcdef";
        assert_eq!(truncate_middle(addr, 6, 4), "0x0123...cdef");
    }

    #[test]
    fn short_strings_stay_whole() {
        assert_eq!(truncate_middle("0x12", 6, 4), "0x12");
        assert_eq!(truncate_middle("0123456789", 6, 4), "0123456789");
    }

    #[test]
    fn camel_case_labels_get_spaces() {
        assert_eq!(spaced_label("totalPlayers"), "total Players");
        assert_eq!(spaced_label("totalTilesMined"), "total Tiles Mined");
        assert_eq!(spaced_label("BotsAlive"), "Bots Alive");
    }
}
