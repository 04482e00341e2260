//! ノード値の取り出しヘルパー

use kdl::{KdlNode, KdlValue};

/// 最初の位置引数（プロパティを除く）
fn first_argument(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

/// 最初の引数を文字列として取得
pub(crate) fn first_string(node: &KdlNode) -> Option<String> {
    first_argument(node)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

/// 最初の引数を整数として取得
pub(crate) fn first_integer(node: &KdlNode) -> Option<i128> {
    first_argument(node).and_then(|v| v.as_integer())
}

/// 最初の引数をブール値として取得
///
/// KDL v2では `#true`/`#false` を使用する必要があるため、
/// 文字列 "true"/"false" が使われた場合は警告を出して受け入れる
pub(crate) fn first_bool(node: &KdlNode) -> Option<bool> {
    let value = first_argument(node)?;
    if let Some(b) = value.as_bool() {
        return Some(b);
    }

    let name = node.name().value();
    match value.as_string()? {
        "true" => {
            tracing::warn!(
                "'{name} \"true\"' は文字列です。KDL v2 では '{name} #true' と記述してください"
            );
            Some(true)
        }
        "false" => {
            tracing::warn!(
                "'{name} \"false\"' は文字列です。KDL v2 では '{name} #false' と記述してください"
            );
            Some(false)
        }
        _ => None,
    }
}

/// 名前付きプロパティを文字列として取得
pub(crate) fn property_string(node: &KdlNode, key: &str) -> Option<String> {
    node.get(key)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}
