// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::candidate::Candidate;

/// 候选空间
///
/// 按字典序惰性枚举字母表上所有长度为 `length` 的字符串，
/// 顺序与笛卡尔积一致（最右侧位置变化最快）。
#[derive(Debug, Clone)]
pub struct CandidateSpace {
    alphabet: Vec<char>,
    length: usize,
}

impl CandidateSpace {
    /// 创建候选空间，字母表中的重复字符会被去除并保持首次出现的顺序
    pub fn new(alphabet: &str, length: usize) -> Self {
        let mut chars: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        Self {
            alphabet: chars,
            length,
        }
    }

    /// 空间大小，溢出时返回 `None`
    pub fn size(&self) -> Option<u64> {
        let length = u32::try_from(self.length).ok()?;
        (self.alphabet.len() as u64).checked_pow(length)
    }

    pub fn iter(&self) -> CandidateIter<'_> {
        let exhausted = self.alphabet.is_empty() && self.length > 0;
        CandidateIter {
            space: self,
            indices: vec![0; self.length],
            exhausted,
        }
    }
}

/// 候选空间迭代器
pub struct CandidateIter<'a> {
    space: &'a CandidateSpace,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Iterator for CandidateIter<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let token: String = self
            .indices
            .iter()
            .map(|&i| self.space.alphabet[i])
            .collect();

        // odometer increment, rightmost position first
        self.exhausted = true;
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.space.alphabet.len() {
                self.exhausted = false;
                break;
            }
            self.indices[position] = 0;
        }

        Some(Candidate::new(token))
    }
}
