//! 디렉터리 검색
//!
//! 검색은 [`VisibleProjection`]에 대해서만 수행합니다. 원본 레코드를 받는 API가
//! 없으므로 숨겨진 값으로 검색해 존재를 추측하는 것이 구조적으로 불가능합니다.

use std::borrow::Borrow;

use crate::visibility::VisibleProjection;

/// 검색 매처
pub struct SearchMatcher;

impl SearchMatcher {
    /// projection이 검색어와 일치하는지 확인
    ///
    /// 대소문자 무시 부분 문자열 비교입니다. 빈 검색어(공백만 있는 경우 포함)는
    /// 모든 projection과 일치합니다.
    pub fn matches(projection: &VisibleProjection, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        searchable_text(projection).any(|text| text.to_lowercase().contains(&needle))
    }

    /// 검색어로 projection 목록 필터링
    pub fn filter<'a, I>(projections: I, query: &'a str) -> impl Iterator<Item = I::Item> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: Borrow<VisibleProjection>,
    {
        projections.into_iter().filter(move |p| {
            Self::matches(<I::Item as Borrow<VisibleProjection>>::borrow(p), query)
        })
    }
}

/// 검색 대상 텍스트 (projection에 존재하는 필드만)
fn searchable_text(projection: &VisibleProjection) -> impl Iterator<Item = &str> {
    let name = std::iter::once(projection.name());
    let leadership = projection.leadership_roles().iter().map(String::as_str);

    let venture = projection.venture().into_iter().flat_map(|v| {
        [
            v.industry.as_str(),
            v.name.as_str(),
            v.description.as_str(),
        ]
    });

    let bio = projection.bio().into_iter();

    let expertise = projection
        .expertise()
        .into_iter()
        .flatten()
        .map(String::as_str);

    let networking = projection.networking().into_iter().flat_map(|n| {
        n.interests
            .iter()
            .chain(n.looking_for.iter())
            .chain(n.offering.iter())
            .map(String::as_str)
    });

    name.chain(leadership)
        .chain(venture)
        .chain(bio)
        .chain(expertise)
        .chain(networking)
}
