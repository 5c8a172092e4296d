//! Static migration guides and the quick-reference document.

/// Guide topics in the order they are advertised to callers.
pub const GUIDE_TOPICS: &[&str] = &[
    "print",
    "unicode",
    "dict_methods",
    "exceptions",
    "division",
    "imports",
];

/// Look up the migration guide for a topic. Topic matching is
/// case-insensitive; `None` means the caller should list `GUIDE_TOPICS`.
pub fn migration_guide(topic: &str) -> Option<&'static str> {
    match topic.to_lowercase().as_str() {
        "print" => Some(PRINT_GUIDE),
        "unicode" => Some(UNICODE_GUIDE),
        "dict_methods" => Some(DICT_METHODS_GUIDE),
        "exceptions" => Some(EXCEPTIONS_GUIDE),
        "division" => Some(DIVISION_GUIDE),
        "imports" => Some(IMPORTS_GUIDE),
        _ => None,
    }
}

const PRINT_GUIDE: &str = r#"## Print Statement → Print Function

Python 2:
```python
print "Hello"
print x, y
print >>sys.stderr, "error"
```

Python 3:
```python
print("Hello")
print(x, y)
print("error", file=sys.stderr)
```

For compatibility, add at top of file:
```python
from __future__ import print_function
```"#;

const UNICODE_GUIDE: &str = r#"## Unicode Changes

Python 2:
```python
u"unicode string"
"byte string"
unicode(x)
```

Python 3:
```python
"unicode string"  # All strings are unicode
b"byte string"    # Explicit bytes
str(x)            # unicode → str
```

For compatibility:
```python
from __future__ import unicode_literals
```"#;

const DICT_METHODS_GUIDE: &str = r#"## Dictionary Methods

Python 2:
```python
d.iteritems()
d.iterkeys()
d.itervalues()
d.has_key(k)
```

Python 3:
```python
d.items()      # Returns view, not list
d.keys()       # Returns view
d.values()     # Returns view
k in d         # Use 'in' operator
```

If you need a list:
```python
list(d.items())
```"#;

const EXCEPTIONS_GUIDE: &str = r#"## Exception Handling

Python 2:
```python
except Exception, e:
    pass

raise ValueError, "message"
```

Python 3:
```python
except Exception as e:
    pass

raise ValueError("message")
```"#;

const DIVISION_GUIDE: &str = r#"## Division

Python 2:
```python
5 / 2  # = 2 (integer division)
```

Python 3:
```python
5 / 2   # = 2.5 (true division)
5 // 2  # = 2 (integer division)
```

For compatibility:
```python
from __future__ import division
```"#;

const IMPORTS_GUIDE: &str = r#"## Changed Imports

Python 2 → Python 3:
- `ConfigParser` → `configparser`
- `Queue` → `queue`
- `cPickle` → `pickle`
- `urllib2` → `urllib.request`
- `urlparse` → `urllib.parse`
- `StringIO` → `io.StringIO`
- `cStringIO` → `io.StringIO`

Use `six` or `future` libraries for compatibility."#;

/// One-page quick reference for the most common changes.
pub fn quick_reference() -> &'static str {
    r#"# Python 2 to 3 Quick Reference

## Most Common Changes

| Python 2 | Python 3 |
|----------|----------|
| `print "x"` | `print("x")` |
| `raw_input()` | `input()` |
| `xrange()` | `range()` |
| `d.iteritems()` | `d.items()` |
| `d.has_key(k)` | `k in d` |
| `unicode()` | `str()` |
| `except E, e:` | `except E as e:` |

## Future Imports for Compatibility

```python
from __future__ import print_function
from __future__ import division
from __future__ import unicode_literals
from __future__ import absolute_import
```

## Tools
- `2to3`: Built-in conversion tool
- `futurize`: Forward-compatible code
- `modernize`: Similar to futurize
- `six`: Compatibility library
"#
}
