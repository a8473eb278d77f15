use crate::{Error, Result};

/// The subjects a score table can list, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    Literature,
    ForeignLanguage,
    Physics,
    Chemistry,
    Biology,
    History,
    Geography,
    CivicEducation,
}

impl Subject {
    pub const ALL: [Subject; 9] = [
        Subject::Math,
        Subject::Literature,
        Subject::ForeignLanguage,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::History,
        Subject::Geography,
        Subject::CivicEducation,
    ];
    pub const SCIENCE: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Biology];
    pub const SOCIAL_SCIENCE: [Subject; 3] =
        [Subject::History, Subject::Geography, Subject::CivicEducation];

    /// Name as printed in the score table and in the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            Subject::Math => "Toán",
            Subject::Literature => "Ngữ văn",
            Subject::ForeignLanguage => "Ngoại ngữ",
            Subject::Physics => "Vật lý",
            Subject::Chemistry => "Hóa học",
            Subject::Biology => "Sinh học",
            Subject::History => "Lịch sử",
            Subject::Geography => "Địa lý",
            Subject::CivicEducation => "Giáo dục công dân",
        }
    }

    pub fn from_name(name: &str) -> Option<Subject> {
        Subject::ALL.into_iter().find(|s| s.name() == name)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Column names of a record, `id` first.
pub const COLUMNS: [&str; 10] = [
    "id",
    "Toán",
    "Ngữ văn",
    "Ngoại ngữ",
    "Vật lý",
    "Hóa học",
    "Sinh học",
    "Lịch sử",
    "Địa lý",
    "Giáo dục công dân",
];

/// Scores of one candidate. `None` marks a subject the candidate did not sit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub id: u64,
    scores: [Option<String>; 9],
}

impl ScoreRecord {
    /// Projects `(subject, score)` pairs onto the fixed column layout.
    ///
    /// A candidate takes either the science or the social-science track: when `Lịch sử` is
    /// absent the social-science group is cleared, otherwise the science group is.
    /// Later pairs overwrite earlier ones for the same subject.
    /// Any subject name outside the known set fails the whole record.
    pub fn normalize<I, K, V>(id: u64, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut scores: [Option<String>; 9] = Default::default();
        let mut has_history = false;

        for (name, score) in pairs {
            let name = name.as_ref();
            let subject =
                Subject::from_name(name).ok_or_else(|| Error::UnknownSubject(name.into()))?;
            has_history |= subject == Subject::History;
            scores[subject.index()] = score.map(Into::into);
        }

        let untaken = if has_history {
            Subject::SCIENCE
        } else {
            Subject::SOCIAL_SCIENCE
        };
        for subject in untaken {
            scores[subject.index()] = None;
        }

        Ok(Self { id, scores })
    }

    pub fn score(&self, subject: Subject) -> Option<&str> {
        self.scores[subject.index()].as_deref()
    }

    /// Subject entries in canonical order, suitable for feeding back into `normalize`.
    /// Absent subjects are skipped, except `Lịch sử`, which is kept when the record
    /// is on the social-science track so the track survives a round trip.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        let social = self.is_social_science_track();
        Subject::ALL.into_iter().filter_map(move |s| match self.score(s) {
            Some(score) => Some((s.name(), Some(score))),
            None if social && s == Subject::History => Some((s.name(), None)),
            None => None,
        })
    }

    /// The record's values in `COLUMNS` order, `id` first.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(COLUMNS.len());
        row.push(self.id.to_string());
        row.extend(self.scores.iter().map(|s| s.clone().unwrap_or_default()));
        row
    }

    fn is_social_science_track(&self) -> bool {
        Subject::SOCIAL_SCIENCE
            .iter()
            .any(|s| self.score(*s).is_some())
    }
}
