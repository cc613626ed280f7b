use blogtext::{dates::count_days, reflow::reflow, validate::validate, wrap::Wrap};
use pretty_assertions::assert_eq;

const POST: &str = r#"## Day 12

Today I looked at the "render" path—again.

<div class="quote">
It's a long story.
</div>

The crash comes from <tt>nsWindow::Create(&aParent)</tt> as shown here:

<ul>
<li>first</li>
<li>second</li>
</ul>

<pre>
#0  0x0000 in nsWindow::Create (this=0x1) at /usr/src/debug/xulrunner-qt5-91.9.1-1.aarch64/widget/qt/nsWindow.cpp:120
#1  0x0001 in main () at /home/flypig/Documents/Development/jolla/gecko-dev-esr91/gecko-dev/toolkit/xre/nsAppRunner.cpp:5000
</pre>

That's all <b>for now</b>.
"#;

const EXPECTED: &str = r#"## Day 12

Today I looked at the &quot;render&quot; path&mdash;again.
<br /><br />

<div class="quote">
It's a long story.
</div>

The crash comes from <tt>nsWindow::Create(&amp;aParent)</tt> as shown here:
<br />

<ul>
<li>first</li>
<li>second</li>
</ul>

<pre>
#0  0x0000 in nsWindow::Create (this=0x1) at widget/qt/nsWindow.cpp:120
#1  0x0001 in main () at ${PROJECT}/toolkit/xre/nsAppRunner.cpp:5000
</pre>

That's all <b>for now</b>.

"#;

#[test]
fn reflows_a_post() {
    let text = reflow(POST, Wrap::default());
    assert_eq!(text, EXPECTED);
    assert_eq!(validate(&text), vec![]);
}

#[test]
fn long_preformatted_lines_wrap() {
    let src = "<pre>error: could not compile `gecko` due to previous error; \
               see /tmp/build/logs/output-of-the-compiler.txt for details</pre>";
    let text = reflow(src, Wrap::default());
    let body: Vec<&str> = text.lines().skip(1).take_while(|l| *l != "</pre>").collect();
    assert_eq!(
        body,
        vec![
            "error: could not compile `gecko` due to previous error; see /tmp/build/logs/",
            "    output-of-the-compiler.txt for details",
        ]
    );
}

#[test]
fn escapes_inside_literals() {
    let text = reflow("<p><tt>a & b</tt></p>\n<pre>x < y > z</pre>", Wrap::default());
    assert!(text.contains("<tt>a &amp; b</tt>"), "{text}");
    assert!(text.contains("x &lt; y &gt; z"), "{text}");
    assert_eq!(validate(&text), vec![]);
}

#[test]
fn unbalanced_output_is_reported() {
    let text = reflow("<p>one</p>\n\n</div>\n\n<p>two</p>", Wrap::default());
    let found = validate(&text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].closing, "div");
    assert_eq!(found[0].line, 4);
    assert_eq!(found[0].source_line, "</div>");
}

#[test]
fn diary_dates() {
    let counts = count_days("# 2024\n1 Jan 2024\n5 Jan 2024 # holiday\n").unwrap();
    assert_eq!(counts.to_string(), "Week days: 1\nWeekend days: 1");
}
