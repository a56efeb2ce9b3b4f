//! The HTML page drawing a stored diff with diff2html

const TEMPLATE: &str = r#"<!doctype html>
<html lang="en-us">
<head>
	<meta charset="utf-8" />
	<title>diffkeep</title>
	<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/10.7.1/styles/github.min.css" />
	<link rel="stylesheet" type="text/css" href="https://cdn.jsdelivr.net/npm/diff2html/bundles/css/diff2html.min.css" />
	<style>
		body {
			background-color: #FAFBFC;
		}
		.d2h-file-header {
			display: none;
		}
		.d2h-info {
			font-size: 21px;
		}
		.d2h-cntx, .d2h-change {
			font-size: 18px;
		}
		.d2h-code-side-linenumber {
			border: none;
		}
		td.d2h-info div.d2h-code-side-line {
			color: #535353;
		}
	</style>
	<script type="text/javascript" src="https://cdn.jsdelivr.net/npm/diff2html/bundles/js/diff2html-ui.min.js"></script>
</head>
<body>
<div id="diff"></div>
<script>
	const diffString = __DIFF__;

	document.addEventListener('DOMContentLoaded', function () {
		const target = document.getElementById('diff');
		const ui = new Diff2HtmlUI(target, diffString, {
			drawFileList: false,
			outputFormat: 'side-by-side',
			highlight: true,
			renderNothingWhenEmpty: true,
		});
		ui.draw();
		ui.highlightCode();

		const sides = document.querySelectorAll('td.d2h-info div.d2h-code-side-line');
		if (sides.length >= 2) {
			sides[0].textContent = 'Original';
			sides[1].textContent = 'New';
		}
	});
</script>
</body>
</html>
"#;

/// Embed a unified diff document in the viewer page.
///
/// The document becomes a JavaScript string literal; every `<` is escaped so user text can never
/// close the surrounding `<script>` element.
pub(crate) fn render(document: &str) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string(document)?.replace('<', "\\u003c");
    Ok(TEMPLATE.replace("__DIFF__", &literal))
}
