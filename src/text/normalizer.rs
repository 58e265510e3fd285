//! 数学记号清理
//!
//! 大模型常把 LaTeX 片段原样写进答案（`\lambda`、`\sqrt{..}`、`^2`），
//! 标准字体画不出来。这里按固定顺序做字面替换，把它们变成单个 Unicode 字符。

/// 有序替换表：(模式, 替换)
///
/// 顺序约定：长的、具体的表达式必须排在它所包含的单个记号之前，
/// 双反斜杠形式排在单反斜杠形式之前，通用的反斜杠和花括号清理放在最后。
pub const REPLACEMENTS: &[(&str, &str)] = &[
    // 具体表达式
    (r"Dn = \\sqrt\{4Rnλ\}", "Dn = √(4Rnλ)"),
    (r"Dn = \sqrt{4Rnλ}", "Dn = √(4Rnλ)"),
    (r"D_\{n,air\}\^2", "D(n,air)²"),
    (r"D_\{n,liquid\}\^2", "D(n,liquid)²"),
    (r"D_{n,air}^2", "D(n,air)²"),
    (r"D_{n,liquid}^2", "D(n,liquid)²"),
    (r"D_\{n,air\}", "D(n,air)"),
    (r"D_\{n,liquid\}", "D(n,liquid)"),
    (r"D_{n,air}", "D(n,air)"),
    (r"D_{n,liquid}", "D(n,liquid)"),
    (r"2t = (2n-1)\\lambda/2", "2t = (2n-1)λ/2"),
    (r"2t = (n+1)\\lambda", "2t = (n+1)λ"),
    (r"2t = n\\lambda/2", "2t = nλ/2"),
    (r"2t = n\\lambda", "2t = nλ"),
    // 行内公式定界符
    (r"\\(", ""),
    (r"\\)", ""),
    (r"\(", ""),
    (r"\)", ""),
    // 根号
    (r"\\sqrt\{", "√("),
    (r"\sqrt\{", "√("),
    (r"\\sqrt{", "√("),
    (r"\sqrt{", "√("),
    (r"\\sqrt", "√"),
    (r"\sqrt", "√"),
    // 希腊字母
    (r"\\alpha", "α"),
    (r"\alpha", "α"),
    (r"\\beta", "β"),
    (r"\beta", "β"),
    (r"\\gamma", "γ"),
    (r"\gamma", "γ"),
    (r"\\Delta", "Δ"),
    (r"\Delta", "Δ"),
    (r"\\delta", "δ"),
    (r"\delta", "δ"),
    (r"\\theta", "θ"),
    (r"\theta", "θ"),
    (r"\\lambda", "λ"),
    (r"\lambda", "λ"),
    (r"\\mu", "μ"),
    (r"\mu", "μ"),
    (r"\\pi", "π"),
    (r"\pi", "π"),
    (r"\\sigma", "σ"),
    (r"\sigma", "σ"),
    (r"\\omega", "ω"),
    (r"\omega", "ω"),
    (r"\\Omega", "Ω"),
    (r"\Omega", "Ω"),
    // 上标
    (r"\^2", "²"),
    (r"^2", "²"),
    (r"\^3", "³"),
    (r"^3", "³"),
    // 转义花括号
    (r"\{", "("),
    (r"\}", ")"),
    // 残留的转义符
    (r"\\", ""),
    (r"\", ""),
    // 不成对的花括号
    ("{", "("),
    ("}", ")"),
];

/// 清理文本中的数学记号
///
/// 按 [`REPLACEMENTS`] 的顺序替换，并重复到结果不再变化为止，
/// 所以 `normalize(normalize(x)) == normalize(x)` 对任意输入成立。
/// 每一轮要么让文本变短，要么减少花括号数量，循环一定会结束。
pub fn normalize(text: &str) -> String {
    let mut current = apply_once(text);
    loop {
        let next = apply_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn apply_once(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            if acc.contains(pattern) {
                acc.replace(pattern, replacement)
            } else {
                acc
            }
        })
}
