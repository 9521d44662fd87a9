use crate::huffman::Node;

enum Step<'a> {
    Visit(&'a Node),
    Emit(&'static str),
}

/// Renders the tree in its parenthesised text form.
///
/// A leaf is `(freq,symbol)`, an internal node `(freq,left,right)` and a
/// missing tree the empty string. Not meant to be parsed back.
pub fn serialize_tree(root: Option<&Node>) -> String {
    let mut out = String::new();
    let mut stack: Vec<Step> = root.map(Step::Visit).into_iter().collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Emit(s) => out.push_str(s),
            Step::Visit(Node::Leaf { symbol, freq }) => {
                out.push_str(&format!("({},{})", freq, symbol));
            }
            Step::Visit(Node::Internal { freq, left, right }) => {
                out.push_str(&format!("({},", freq));
                stack.push(Step::Emit(")"));
                stack.push(Step::Visit(right));
                stack.push(Step::Emit(","));
                stack.push(Step::Visit(left));
            }
        }
    }

    out
}
