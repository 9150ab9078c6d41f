use serde::{Deserialize, Serialize};

/// 章节
///
/// 规划卡的固定章节表，声明顺序即文档顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chapter {
    Introduction, // 导言
    Chapter1,
    Chapter2,
    Chapter3,
    Chapter4,
    Chapter5,
    Chapter6,
    Chapter7,
    Chapter8,
    Chapter9,
    Chapter10,
}

impl Chapter {
    /// 全部章节，按检测优先级（即文档顺序）排列
    pub const ALL: [Chapter; 11] = [
        Chapter::Introduction,
        Chapter::Chapter1,
        Chapter::Chapter2,
        Chapter::Chapter3,
        Chapter::Chapter4,
        Chapter::Chapter5,
        Chapter::Chapter6,
        Chapter::Chapter7,
        Chapter::Chapter8,
        Chapter::Chapter9,
        Chapter::Chapter10,
    ];

    /// 文档中的章节标记文字
    pub fn label(&self) -> &'static str {
        match self {
            Chapter::Introduction => "导言",
            Chapter::Chapter1 => "第一章",
            Chapter::Chapter2 => "第二章",
            Chapter::Chapter3 => "第三章",
            Chapter::Chapter4 => "第四章",
            Chapter::Chapter5 => "第五章",
            Chapter::Chapter6 => "第六章",
            Chapter::Chapter7 => "第七章",
            Chapter::Chapter8 => "第八章",
            Chapter::Chapter9 => "第九章",
            Chapter::Chapter10 => "第十章",
        }
    }

    /// 章节名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Chapter::Introduction => "导言",
            Chapter::Chapter1 => "进入近代后中华民族的磨难与抗争",
            Chapter::Chapter2 => "不同社会力量对国家出路的早期探索",
            Chapter::Chapter3 => "辛亥革命与君主专制制度的终结",
            Chapter::Chapter4 => "中国共产党成立和中国革命新局面",
            Chapter::Chapter5 => "中国革命的新道路",
            Chapter::Chapter6 => "中华民族的抗日战争",
            Chapter::Chapter7 => "为建立新中国而奋斗",
            Chapter::Chapter8 => "中华人民共和国的成立与中国社会主义建设道路的探索",
            Chapter::Chapter9 => "改革开放与中国特色社会主义的开创和发展",
            Chapter::Chapter10 => "中国特色社会主义进入新时代",
        }
    }
}

/// 重要程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    ThreeStar, // ★★★ 核心考点
    TwoStar,   // ★★ 重要考点
    OneStar,   // ★ 一般考点
}

impl Importance {
    /// 从高到低排列
    pub const ALL: [Importance; 3] = [
        Importance::ThreeStar,
        Importance::TwoStar,
        Importance::OneStar,
    ];

    /// 由星号串解析，只接受完整的 1~3 个星号
    pub fn from_stars(stars: &str) -> Option<Self> {
        match stars {
            "★★★" => Some(Importance::ThreeStar),
            "★★" => Some(Importance::TwoStar),
            "★" => Some(Importance::OneStar),
            _ => None,
        }
    }

    pub fn stars(&self) -> &'static str {
        match self {
            Importance::ThreeStar => "★★★",
            Importance::TwoStar => "★★",
            Importance::OneStar => "★",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Importance::ThreeStar => "核心考点",
            Importance::TwoStar => "重要考点",
            Importance::OneStar => "一般考点",
        }
    }

    /// 知识点列表中的级别称呼
    pub fn tier(&self) -> &'static str {
        match self {
            Importance::ThreeStar => "核心",
            Importance::TwoStar => "重要",
            Importance::OneStar => "一般",
        }
    }
}

/// 考核要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamRequirement {
    SingleChoice, // 单选
    ShortAnswer,  // 简答
    Essay,        // 论述
}

impl ExamRequirement {
    pub const ALL: [ExamRequirement; 3] = [
        ExamRequirement::SingleChoice,
        ExamRequirement::ShortAnswer,
        ExamRequirement::Essay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExamRequirement::SingleChoice => "单选",
            ExamRequirement::ShortAnswer => "简答",
            ExamRequirement::Essay => "论述",
        }
    }

    /// 文档中的标签写法，如 `【单选】`
    pub fn tag(&self) -> &'static str {
        match self {
            ExamRequirement::SingleChoice => "【单选】",
            ExamRequirement::ShortAnswer => "【简答】",
            ExamRequirement::Essay => "【论述】",
        }
    }
}

/// 内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    HistoricalEvent,        // 历史事件
    FiguresAndThought,      // 人物思想
    TheoryAndPolicy,        // 理论政策
    HistoricalSignificance, // 历史意义
    Other,                  // 其他
}

impl ContentType {
    /// 报告中的显示顺序
    pub const ALL: [ContentType; 5] = [
        ContentType::HistoricalEvent,
        ContentType::FiguresAndThought,
        ContentType::TheoryAndPolicy,
        ContentType::HistoricalSignificance,
        ContentType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::HistoricalEvent => "历史事件",
            ContentType::FiguresAndThought => "人物思想",
            ContentType::TheoryAndPolicy => "理论政策",
            ContentType::HistoricalSignificance => "历史意义",
            ContentType::Other => "其他",
        }
    }
}

/// 知识点
///
/// 由 `知识点N` 标题行开启，到下一个标题行、章节标记或文末结束
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgePoint {
    /// 原文中的编号，不保证唯一或连续
    pub id: String,
    /// 去除编号、括号标签和星号后的标题
    pub title: String,
    /// 所属章节；首个章节标记之前出现的知识点为 None
    pub chapter: Option<Chapter>,
    /// 重要程度；None 表示未标注
    pub importance: Option<Importance>,
    /// 考核要求，按 单选/简答/论述 顺序，无重复
    pub exam_requirements: Vec<ExamRequirement>,
    /// 内容行（已去除首尾空白）
    pub content: Vec<String>,
    /// 标题行在全文中的行号（从 0 开始）
    pub start_line: usize,
}

impl KnowledgePoint {
    /// 内容行以空格连接
    pub fn joined_content(&self) -> String {
        self.content.join(" ")
    }
}
