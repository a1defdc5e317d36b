use php_cst::cst::sexpr;
use php_cst::lexer::AnomalyKind;
use php_cst::lexer::token::TokenKind;
use php_cst::parser::Parser;
use php_cst::{PhraseKind, parse, tokenize};

const SAMPLE: &str = r#"<!DOCTYPE html>
<?php
declare(strict_types=1);

namespace App\Model;

use Foo\Bar, Baz as Qux;
use function Util\helper;
use Lib\{Alpha, Beta as B,};

const VERSION = '1.0', DEBUG = false;

interface Shape extends \Countable
{
    const SIDES = 0;
    public function area(): float;
}

trait Named
{
    protected $name = 'shape';

    public function name(): ?string
    {
        return $this->name;
    }
}

/**
 * Base of all shapes.
 */
abstract class Base implements Shape
{
    use Named { name as protected baseName; }

    protected static $count = 0;
    var $legacy;

    public function __construct(array $points = [], ...$rest)
    {
        parent::__construct();
        static::$count++;
        $this->points = $points + $rest;
    }

    abstract public function area(): float;

    final public static function count()
    {
        return self::$count;
    }
}

function &refs(int $a, &$b = null)
{
    static $calls = 0, $seen;
    global $config;
    $calls++;
    $fn = function ($x) use ($a, &$b): int {
        return $x + $a * 2 ** 3;
    };
    $gen = (function () {
        yield 1;
        yield 'k' => 2;
        yield from [3];
    })();
    return $fn;
}

list($x, list(, $y)) = [1, [2, 3]];
[$p, $q] = [$q, $p];
$pairs = array('a' => 1, 'b' => &$x, 3);

echo "Hello {$user->name} ${greeting} $cache[0] $config->path\n";
$html = <<<HTML
<div class="$class">{$title}</div>
HTML;
$raw = <<<'RAW'
$not {$interpolated}
RAW;

$obj = new class(1) extends Base {
    public function area(): float { return 0.0; }
};
$plain = new \App\Model\Square($side);
$dynamic = new $class;
$ok = $obj instanceof Base && !$obj instanceof Shape;

$r = $a <=> $b ?: $c ?? $d;
$t = $a ? $b : ($c ? $d : $e);
$n **= 2;
$m ??= [];
$s .= 'x' . PHP_EOL;
$bits = $a << 2 | $b >> 1 & ~$c ^ 0xFF;
$cmp = $a === $b || $a !== $c and $d != $e or $f xor $g;
$copy = clone $obj;
$ref = &$copy;
$cast = (int) $s + (float) '1.5' . (string) 1 + (bool) 0;
echo @$arr['k'], -$n, +$m, !$flag, __LINE__, __CLASS__;
$chain = $a->b()->c[1]::D;
$static = Foo::$bar['x'];
$call = Foo::{'bar'}();
$var = $$name;

if ($a > 1) {
    echo 1;
} elseif ($a < 0) {
    echo 2;
} else {
    echo 3;
}

for ($i = 0, $j = 10; $i < $j; $i++, $j--) {
    continue;
}

foreach ($items as $key => &$item):
    switch ($item) {
        case 'a':
        case 'b';
            continue 2;
        default:
            break;
    }
endforeach;

while ($i-- > 0) {
    if ($i % 2) continue;
}

do {
    $i++;
} while ($i < 3);

try {
    risky();
} catch (\RuntimeException | LogicException $e) {
    throw $e;
} finally {
    cleanup();
}

if (isset($a['x'], $b->c) && !empty($d)) {
    unset($a['x']);
    exit(1);
}

require_once __DIR__ . '/bootstrap.php';
include 'optional.php';
print 'done';
$out = `ls -la $dir`;
goto end;
end:
echo 'finished';
?>
<p><?= $title ?></p>
<?php
__halt_compiler();
raw <?php bytes ?> here
"#;

#[test]
fn test_sample_round_trips_without_errors() {
    let mut parser = Parser::new(SAMPLE);
    let root = parser.parse();
    assert_eq!(root.text(SAMPLE), SAMPLE);
    assert!(root.errors().is_empty(), "{:#?}", root.errors());
    assert!(parser.anomalies().is_empty());

    for kind in [
        PhraseKind::DeclareStatement,
        PhraseKind::NamespaceUseGroupClauseList,
        PhraseKind::TraitAlias,
        PhraseKind::AnonymousFunctionUseClause,
        PhraseKind::YieldFromExpression,
        PhraseKind::ListIntrinsic,
        PhraseKind::HeredocStringLiteral,
        PhraseKind::AnonymousClassDeclaration,
        PhraseKind::CoalesceExpression,
        PhraseKind::ByRefAssignmentExpression,
        PhraseKind::ScopedCallExpression,
        PhraseKind::CatchNameList,
        PhraseKind::ShellCommandExpression,
        PhraseKind::NamedLabelStatement,
        PhraseKind::HaltCompilerStatement,
    ] {
        assert!(root.find(kind).is_some(), "{kind:?} missing");
    }
}

#[test]
fn test_tokens_span_the_sample() {
    let tokens = tokenize(SAMPLE);
    let text: String = tokens.iter().map(|t| t.text(SAMPLE)).collect();
    assert_eq!(text, SAMPLE);

    let raw = tokens.iter().rev().find(|t| t.kind == TokenKind::Text).expect("raw data");
    assert_eq!(raw.text(SAMPLE), "\nraw <?php bytes ?> here\n");
}

#[test]
fn test_every_prefix_round_trips() {
    // Cutting the sample anywhere leaves constructs open in every mode.
    let boundaries = (0..=SAMPLE.len()).filter(|i| SAMPLE.is_char_boundary(*i));
    for end in boundaries {
        let code = &SAMPLE[..end];
        let root = parse(code);
        assert_eq!(root.text(code), code, "prefix of {end} bytes");
    }
}

#[test]
fn test_parsing_is_deterministic() {
    let first = sexpr::format_with_trivia(&parse(SAMPLE), SAMPLE);
    let second = sexpr::format_with_trivia(&parse(SAMPLE), SAMPLE);
    assert_eq!(first, second);
}

#[test]
fn test_anomalies_surface_through_parser() {
    let code = "<?php echo \"open $a";
    let mut parser = Parser::new(code);
    let root = parser.parse();
    assert_eq!(root.text(code), code);
    let kinds: Vec<AnomalyKind> = parser.anomalies().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AnomalyKind::UnterminatedString]);
}

#[test]
fn test_empty_and_text_only_input() {
    let root = parse("");
    assert!(root.children.is_empty());
    assert!(root.errors().is_empty());

    let code = "just text, no tags";
    let root = parse(code);
    assert_eq!(root.text(code), code);
    assert_eq!(root.child_phrases().map(|p| p.kind).collect::<Vec<_>>(), vec![PhraseKind::InlineText]);
}

#[test]
fn test_non_ascii_input_round_trips() {
    let inputs = [
        "<?php __halt_compiler é();",
        "<?php $café = 'naïve ☕'; echo \"$café €\"; // ünïcödé\n?>ñ<?php /* 日本 */",
        "<?php echo 1; ¿ é → $x;",
        "<?php $a = <<<ÉOT\n∑ {$b}\nÉOT;\n",
    ];
    for code in inputs {
        for token in tokenize(code) {
            assert!(code.is_char_boundary(token.offset), "{code:?} {token:?}");
            assert!(code.is_char_boundary(token.end()), "{code:?} {token:?}");
        }
        let root = parse(code);
        assert_eq!(root.text(code), code);
    }

    let code = inputs[0];
    let unknown: Vec<&str> = tokenize(code)
        .iter()
        .filter(|t| t.kind == TokenKind::Unknown)
        .map(|t| t.text(code))
        .collect();
    assert_eq!(unknown, vec!["é"]);
}
