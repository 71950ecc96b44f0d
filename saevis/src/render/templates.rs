pub const CDN_TEMPLATE_NAME: &str = "cdn_template";
pub const LOCAL_TEMPLATE_NAME: &str = "local_template";
pub const DOCUMENT_TEMPLATE_NAME: &str = "document_template";

pub const CDN_TEMPLATE: &str = r#"<div id="{{ mount_id }}" style="margin: 15px 0;"/>
<script crossorigin type="module">
import { render, {{ component }} } from {{ bundle_url }};
render(
  "{{ mount_id }}",
  {{ component }},
  {{ props }}
)
</script>"#;

pub const LOCAL_TEMPLATE: &str = r#"<div id="{{ mount_id }}" style="margin: 15px 0;"/>
<script crossorigin type="module">
{{ bundle }}
CircuitsVis.render(
  "{{ mount_id }}",
  CircuitsVis.{{ component }},
  {{ props }}
)
</script>"#;

pub const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title|e }}</title>
</head>
<body>
{{ fragment }}
</body>
</html>
"#;
