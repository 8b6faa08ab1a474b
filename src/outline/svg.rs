use crate::foundation::core::BezPath;
use crate::foundation::error::{EtherError, EtherResult};

/// Return the first `<path>` element of an SVG document, in document order.
///
/// Only elements literally named `path` count: shapes such as `<rect>` or `<circle>` are ignored,
/// and paths inside `<defs>` are found like any other. Element transforms are not applied; the
/// outline is re-centered after sampling anyway.
pub(crate) fn first_path(svg_bytes: &[u8]) -> EtherResult<BezPath> {
    let text = std::str::from_utf8(svg_bytes)
        .map_err(|e| EtherError::outline(format!("svg is not utf-8: {e}")))?;
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| EtherError::outline(format!("parse svg: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(EtherError::outline(format!(
            "root element is <{}>, expected <svg>",
            root.tag_name().name()
        )));
    }

    let node = root
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "path")
        .ok_or_else(|| EtherError::outline("svg contains no path element"))?;
    let d = node
        .attribute("d")
        .ok_or_else(|| EtherError::outline("first path element has no 'd' attribute"))?;

    BezPath::from_svg(d).map_err(|e| EtherError::outline(format!("invalid path data: {e}")))
}
