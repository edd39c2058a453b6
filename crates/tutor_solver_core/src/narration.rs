//! Learner-facing narration texts.
//!
//! Kept apart from the procedures so wording can change without touching the
//! math. Formula fragments passed in are machine text; the assembler formats
//! them for display.

// =============================================================================
// Shared
// =============================================================================

pub const FINAL_ANSWER_STEP: &str = "Записываем ответ";

pub fn not_given_message(name: &str, consequence: &str) -> String {
    format!("{} не задан, {} (N/A)", name, consequence)
}

// =============================================================================
// Arithmetic
// =============================================================================

pub const FRACTIONS_IDEA: &str = "Выполняем действия по порядку: сначала степени, затем умножение и деление, \
     затем сложение и вычитание. Дроби складываем и вычитаем после приведения к общему знаменателю.";
pub const DECIMALS_IDEA: &str = "Выполняем действия по порядку: сначала степени, затем умножение и деление, \
     затем сложение и вычитание, следя за положением запятой.";
pub const POWERS_IDEA: &str = "Записываем числа вида a·10ⁿ в виде десятичных дробей и выполняем действия \
     по порядку.";

pub const FRACTIONS_HINTS: [&str; 2] = [
    "Общий знаменатель удобно брать равным НОК знаменателей.",
    "После каждого действия проверьте, нельзя ли сократить дробь.",
];
pub const DECIMALS_HINTS: [&str; 2] = [
    "При умножении десятичных дробей запятую ставят после подсчёта знаков после запятой у множителей.",
    "Деление на десятичную дробь удобно заменить делением на целое число, перенеся запятую.",
];
pub const POWERS_HINTS: [&str; 2] = [
    "Умножение на 10ⁿ переносит запятую на n знаков вправо, на 10⁻ⁿ на n знаков влево.",
    "Степени вычисляйте раньше умножения и деления.",
];

pub const NUMERATOR_STEP: &str = "Выписываем числитель несократимой дроби";
pub const DENOMINATOR_STEP: &str = "Выписываем знаменатель несократимой дроби";

// =============================================================================
// Function matching
// =============================================================================

pub const FUNCTION_MATCHING_IDEA: &str = "По виду формулы определяем тип графика (прямая, парабола, \
     гипербола, корень), затем по знакам коэффициентов находим подходящий рисунок.";
pub const FUNCTION_MATCHING_HINTS: [&str; 2] = [
    "Знак коэффициента при x² определяет направление ветвей параболы.",
    "Свободный член равен ординате точки пересечения графика с осью Y.",
];
pub const UNDETERMINED_MATCH: &str = "определить нельзя";

pub fn classify_option_message(option: &str) -> String {
    format!("Определяем вид графика формулы №{}", option)
}

pub fn graph_match_message(label: &str, features: &str) -> String {
    if features.is_empty() {
        format!("График {}", label)
    } else {
        format!("График {}: {}", label, features)
    }
}

// =============================================================================
// Sign matching
// =============================================================================

pub const QUADRATIC_SIGNS_IDEA: &str = "Знак a задаёт направление ветвей параболы, знак c показывает, \
     где парабола пересекает ось Y, а абсцисса вершины x₀ = −b/(2a) показывает, по какую сторону \
     от оси Y лежит вершина.";
pub const LINEAR_SIGNS_IDEA: &str = "Знак k показывает, возрастает прямая или убывает, а знак b показывает, \
     где прямая пересекает ось Y.";
pub const SIGN_MATCHING_HINTS: [&str; 2] = [
    "Подставьте x = 0, чтобы найти точку пересечения с осью Y.",
    "Сравните направление графика со знаком старшего коэффициента.",
];

pub const BRANCHES_UP: &str = "ветви направлены вверх";
pub const BRANCHES_DOWN: &str = "ветви направлены вниз";
pub const NOT_A_PARABOLA: &str = "это не парабола, а прямая";
pub const CROSSES_ABOVE: &str = "пересекает ось Y выше нуля";
pub const CROSSES_BELOW: &str = "пересекает ось Y ниже нуля";
pub const THROUGH_ORIGIN: &str = "проходит через начало координат";
pub const INCREASING: &str = "прямая возрастает";
pub const DECREASING: &str = "прямая убывает";
pub const HORIZONTAL: &str = "горизонтальная прямая";

pub fn analyse_curve_message(label: &str) -> String {
    if label.is_empty() {
        "Анализируем знаки коэффициентов".to_string()
    } else {
        format!("Анализируем знаки коэффициентов кривой {}", label)
    }
}

pub fn vertex_message(x0: &str, side: VertexSide) -> String {
    match side {
        VertexSide::Right => format!("вершина правее оси Y (x0 = {})", x0),
        VertexSide::Left => format!("вершина левее оси Y (x0 = {})", x0),
        VertexSide::OnAxis => "вершина лежит на оси Y (x0 = 0)".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexSide {
    Left,
    OnAxis,
    Right,
}

// =============================================================================
// Rational inequalities
// =============================================================================

pub const INEQUALITY_IDEA: &str = "Переносим всё в одну часть, раскладываем числитель и знаменатель \
     на линейные множители и решаем неравенство методом интервалов.";
pub const INEQUALITY_HINTS: [&str; 2] = [
    "Нули знаменателя никогда не входят в ответ.",
    "При нестрогом неравенстве нули числителя входят в ответ.",
];

pub const MOVE_TO_LEFT_STEP: &str = "Переносим всё в левую часть и приводим к общему знаменателю";
pub const FACTOR_STEP: &str = "Раскладываем на множители";
pub const NUMERATOR_ZEROS_STEP: &str = "Находим нули числителя";
pub const DENOMINATOR_ZEROS_STEP: &str = "Находим нули знаменателя (эти точки выкалываются)";
pub const SIGN_TABLE_STEP: &str = "Определяем знак выражения на каждом промежутке";
pub const NO_ZEROS: &str = "нулей нет";
pub const DISCRIMINANT_STEP: &str = "Находим дискриминант знаменателя";
pub const ZERO_NUMERATOR_BRANCH: &str =
    "K = 0, дробь равна нулю при всех x из области определения";

pub fn select_intervals_message(relation_symbol: &str) -> String {
    format!(
        "Выбираем промежутки, где выражение {} 0",
        relation_symbol
    )
}
